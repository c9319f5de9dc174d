use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

fn login_project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "uixml/input/ENG/login.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<LOGIN>
    <TITLE>Sign in</TITLE>
    <USER_LBL>User</USER_LBL>
    <ID>login</ID>
</LOGIN>"#,
    )?;
    test.write_file(
        "uixml/input/CHT/login.xml",
        r#"<LOGIN><TITLE>登入</TITLE><USER_LBL>用戶</USER_LBL><ID>login</ID></LOGIN>"#,
    )?;
    test.write_file(
        "uixml/input/ENG/home.xml",
        "<HOME><TITLE>Home</TITLE></HOME>",
    )?;
    Ok(test)
}

#[test]
fn test_load_writes_templates_and_workbook() -> Result<()> {
    let test = login_project()?;

    let (code, stdout, _) = run(test.load_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Loaded 2 documents from 3 files: 3 templates, 3 labels"));

    let template = test.read_file("uixml/template/CHT/login.xml")?;
    assert!(template.contains("<TITLE>${LOGIN.TITLE}</TITLE>"));
    assert!(template.contains("<ID>login</ID>"));
    assert!(!test.exists("uixml/template/CHS/login.xml"));

    let workbook: Value = serde_json::from_str(&test.read_file("uixml/labels.json")?)?;
    assert_eq!(
        workbook,
        json!({
            "sheets": [
                {
                    "name": "home",
                    "rows": [
                        ["LABEL", "ENG", "CHS", "CHT"],
                        ["HOME.TITLE", "Home", null, null]
                    ]
                },
                {
                    "name": "login",
                    "rows": [
                        ["LABEL", "ENG", "CHS", "CHT"],
                        ["LOGIN.TITLE", "Sign in", null, "登入"],
                        ["LOGIN.USER_LBL", "User", null, "用戶"]
                    ]
                }
            ]
        })
    );

    Ok(())
}

#[test]
fn test_load_reports_broken_document() -> Result<()> {
    let test = login_project()?;
    test.write_file("uixml/input/CHS/login.xml", "<LOGIN><TITLE>登录</LOGIN>")?;

    let (code, stdout, _) = run(test.load_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: cannot parse CHS document"));
    assert!(stdout.contains("uixml/input/CHS/login.xml"));
    // Sibling languages still produce their templates.
    assert!(test.exists("uixml/template/ENG/login.xml"));
    assert!(test.exists("uixml/template/CHT/login.xml"));
    assert!(!test.exists("uixml/template/CHS/login.xml"));

    Ok(())
}

#[test]
fn test_load_language_override() -> Result<()> {
    let test = login_project()?;

    let mut cmd = test.load_command();
    cmd.args(["--languages", "ENG", "--workbook", "out/eng.json"]);
    let (code, _, _) = run(cmd)?;

    assert_eq!(code, 0);
    let workbook: Value = serde_json::from_str(&test.read_file("out/eng.json")?)?;
    assert_eq!(workbook["sheets"][1]["rows"][0], json!(["LABEL", "ENG"]));
    assert!(!test.exists("uixml/template/CHT/login.xml"));

    Ok(())
}

#[test]
fn test_load_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".uixmlrc.json",
        r#"{ "languages": ["EN", "JA"], "inputRoot": "ui", "workbook": "labels.json" }"#,
    )?;
    test.write_file("ui/JA/menu.xml", "<MENU><TITLE>メニュー</TITLE></MENU>")?;

    let (code, _, _) = run(test.load_command())?;

    assert_eq!(code, 0);
    let workbook: Value = serde_json::from_str(&test.read_file("labels.json")?)?;
    assert_eq!(
        workbook["sheets"][0]["rows"],
        json!([["LABEL", "EN", "JA"], ["MENU.TITLE", null, "メニュー"]])
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file(".uixmlrc.json", r#"{ "languages": [] }"#)?;

    let (code, _, stderr) = run(test.load_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("error:"));
    assert!(!test.exists("uixml/labels.json"));

    Ok(())
}

#[test]
fn test_reload_after_broken_document_skips_its_output() -> Result<()> {
    let test = login_project()?;
    test.write_file("uixml/input/CHS/login.xml", "<LOGIN><TITLE>登录</TITLE></LOGIN>")?;

    let (code, _, _) = run(test.load_command())?;
    assert_eq!(code, 0);
    let (code, _, _) = run(test.generate_command())?;
    assert_eq!(code, 0);
    assert!(test.exists("uixml/output/CHS/login.xml"));

    test.write_file("uixml/input/CHS/login.xml", "<LOGIN><TITLE>登录</LOGIN>")?;
    let (code, _, _) = run(test.load_command())?;
    assert_eq!(code, 1);
    assert!(!test.exists("uixml/template/CHS/login.xml"));

    let (code, stdout, _) = run(test.generate_command())?;
    assert_eq!(code, 0);
    assert!(!stdout.contains("untranslated"));
    assert!(!test.exists("uixml/output/CHS/login.xml"));
    assert!(test.exists("uixml/output/CHT/login.xml"));

    Ok(())
}

#[test]
fn test_load_reports_unwritable_template() -> Result<()> {
    let test = login_project()?;
    test.write_file("uixml/template/CHT", "")?;

    let (code, stdout, _) = run(test.load_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: cannot write file  write-error"));
    assert!(stdout.contains("--> uixml/template/CHT/login.xml"));
    assert!(test.exists("uixml/template/ENG/login.xml"));
    assert!(test.exists("uixml/template/ENG/home.xml"));
    assert!(test.exists("uixml/labels.json"));

    Ok(())
}
