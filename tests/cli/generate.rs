use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const WORKBOOK: &str = r#"{
  "sheets": [
    {
      "name": "login",
      "rows": [
        ["LABEL", "ENG", "CHS", "CHT"],
        ["LOGIN.TITLE", "Sign in & go", "登录", "登入"],
        ["LOGIN.USER_LBL", "User", null, "用戶"]
      ]
    }
  ]
}"#;

const TEMPLATE: &str = "<LOGIN>
    <TITLE>${LOGIN.TITLE}</TITLE>
    <USER_LBL>${LOGIN.USER_LBL}</USER_LBL>
</LOGIN>
";

fn translated_project() -> Result<CliTest> {
    let test = CliTest::with_file("uixml/labels.json", WORKBOOK)?;
    for language in ["ENG", "CHS", "CHT"] {
        test.write_file(&format!("uixml/template/{}/login.xml", language), TEMPLATE)?;
    }
    Ok(test)
}

#[test]
fn test_generate_fills_templates() -> Result<()> {
    let test = translated_project()?;

    let (code, stdout, _) = run(test.generate_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Generated 3 documents from 1 sheet"));
    assert_eq!(
        test.read_file("uixml/output/ENG/login.xml")?,
        "<LOGIN>
    <TITLE>Sign in &amp; go</TITLE>
    <USER_LBL>User</USER_LBL>
</LOGIN>
"
    );
    assert_eq!(
        test.read_file("uixml/output/CHT/login.xml")?,
        "<LOGIN>
    <TITLE>登入</TITLE>
    <USER_LBL>用戶</USER_LBL>
</LOGIN>
"
    );

    Ok(())
}

#[test]
fn test_generate_warns_on_untranslated_labels() -> Result<()> {
    let test = translated_project()?;

    let (code, stdout, _) = run(test.generate_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("warning: 1 untranslated label in login (CHS)"));
    assert!(stdout.contains("= note: LOGIN.USER_LBL"));
    assert!(
        test.read_file("uixml/output/CHS/login.xml")?
            .contains("<USER_LBL>${LOGIN.USER_LBL}</USER_LBL>")
    );

    Ok(())
}

#[test]
fn test_generate_without_workbook_fails() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.generate_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to read workbook"));

    Ok(())
}

#[test]
fn test_generate_rejects_malformed_workbook() -> Result<()> {
    let test = CliTest::with_file(
        "uixml/labels.json",
        r#"{ "sheets": [ { "name": "login", "rows": [["KEY", "ENG", "CHS", "CHT"]] } ] }"#,
    )?;

    let (code, _, stderr) = run(test.generate_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Malformed workbook"));
    assert!(!test.exists("uixml/output"));

    Ok(())
}

#[test]
fn test_load_then_generate_round_trip() -> Result<()> {
    let test = CliTest::with_file(
        "uixml/input/ENG/page.xml",
        r#"<PAGE id="p1">
    <TITLE>Terms &amp; Conditions</TITLE>
    <NOTE>Read carefully</NOTE>
</PAGE>
"#,
    )?;

    let (code, _, _) = run(test.load_command())?;
    assert_eq!(code, 0);
    let (code, _, _) = run(test.generate_command())?;
    assert_eq!(code, 0);

    let output = test.read_file("uixml/output/ENG/page.xml")?;
    assert!(output.contains("<TITLE>Terms &amp; Conditions</TITLE>"));
    assert!(output.contains("Read carefully"));
    assert!(output.contains(r#"id="p1""#));

    Ok(())
}

#[test]
fn test_generate_clean_removes_stale_outputs() -> Result<()> {
    let test = translated_project()?;
    test.write_file("uixml/output/ENG/old.xml", "<OLD/>")?;

    let mut cmd = test.generate_command();
    cmd.arg("--clean");
    let (code, _, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(!test.exists("uixml/output/ENG/old.xml"));
    assert!(test.exists("uixml/output/ENG/login.xml"));

    Ok(())
}
