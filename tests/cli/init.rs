use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(
        parsed.get("includes").is_some(),
        "Config should have 'includes' field"
    );
    assert!(
        parsed.get("rootNamespace").is_some(),
        "Config should have 'rootNamespace' field"
    );
    assert_eq!(parsed["noLocalizeComment"], "/*VL_NO_LOC*/");

    // 2-space indentation
    assert!(content.contains("\n  \""), "Config should be pretty printed");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command());

    assert!(test.root().join(".locscanrc.json").exists());
    assert_config_content(&test.read_file(".locscanrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locscanrc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command());
    assert_eq!(test.read_file(".locscanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.init_command().output()?;
    test.write_file("Program.cs", "class P { int x = 1; }")?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}
