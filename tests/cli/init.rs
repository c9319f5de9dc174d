use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Created .uixmlrc.json"));

    let content = test.read_file(".uixmlrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["languages"], serde_json::json!(["ENG", "CHS", "CHT"]));
    assert!(parsed.get("inputRoot").is_some());
    assert!(parsed.get("workbook").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".uixmlrc.json", "{}")?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stdout.contains(".uixmlrc.json already exists"));
    assert_eq!(test.read_file(".uixmlrc.json")?, "{}");

    Ok(())
}
