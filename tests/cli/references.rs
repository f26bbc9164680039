use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

const RESOURCES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Greeting" xml:space="preserve">
    <value>Hello</value>
  </data>
  <data name="Farewell" xml:space="preserve">
    <value>Bye</value>
  </data>
</root>
"#;

const RESOURCES_DE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Greeting" xml:space="preserve">
    <value>Hallo</value>
  </data>
</root>
"#;

const PROGRAM: &str = r#"using Demo.Properties;
using P = Demo.Properties;

namespace Demo
{
    class Program
    {
        string a = Resources.Greeting;
        string b = P.Resources.Farewell;
        string c = "Resources.Greeting";
    }
}
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(".locscanrc.json", r#"{ "rootNamespace": "Demo" }"#)?;
    test.write_file("Properties/Resources.resx", RESOURCES)?;
    test.write_file("Properties/Resources.de.resx", RESOURCES_DE)?;
    test.write_file("Program.cs", PROGRAM)?;
    Ok(test)
}

#[test]
fn test_references() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.references_command());
    Ok(())
}

#[test]
fn test_prefer_culture_specific_origin() -> Result<()> {
    let test = project()?;

    let mut cmd = test.references_command();
    cmd.args(["--prefer", "Properties/Resources.de.resx"]);
    assert_cmd_snapshot!(cmd);
    Ok(())
}

#[test]
fn test_prefer_unknown_file_fails() -> Result<()> {
    let test = project()?;

    let mut cmd = test.references_command();
    cmd.args(["--prefer", "Missing.resx"]);
    assert_cmd_snapshot!(cmd);
    Ok(())
}

#[test]
fn test_resource_filter() -> Result<()> {
    let test = project()?;

    let mut cmd = test.references_command();
    cmd.args(["--resource", "**/Resources.de.resx"]);
    assert_cmd_snapshot!(cmd);
    Ok(())
}

#[test]
fn test_visual_basic_line_continuation() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Module1.vb",
        "Module Module1\n    Dim t = Properties.Resources _\n        .Greeting\nEnd Module\n",
    )?;

    let mut cmd = test.references_command();
    cmd.args(["--format", "json"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&output.stdout)?;
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    let vb = findings
        .iter()
        .find(|f| {
            f["context"]["filePath"]
                .as_str()
                .is_some_and(|p| p.ends_with("Module1.vb"))
        })
        .expect("reference in Module1.vb");

    assert_eq!(vb["reference"]["originalText"], "Properties.Resources.Greeting");
    assert_eq!(vb["reference"]["fullText"], "Demo.Properties.Resources.Greeting");
    assert_eq!(vb["reference"]["span"]["start"]["line"], 2);
    assert_eq!(vb["reference"]["span"]["end"]["line"], 3);
    assert_eq!(vb["severity"], "note");

    Ok(())
}

#[test]
fn test_malformed_resource_is_reported() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Errors.resx",
        "<root><data name=\"x\"><value>x</data></root>",
    )?;

    // The XML error text comes from quick-xml.
    insta::with_settings!({
        filters => vec![(
            r#"at byte \d+: .*"  parse-error"#,
            r#"at byte [POS]: [XML ERROR]"  parse-error"#,
        )],
    }, {
        assert_cmd_snapshot!(test.references_command());
    });
    Ok(())
}

#[test]
fn test_markup_references() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Default.aspx",
        "<%@ Page Language=\"C#\" %>\n<%@ Import Namespace=\"Demo.Properties\" %>\n\
         <h1><%: Resources.Greeting %></h1>\n",
    )?;

    assert_cmd_snapshot!(test.references_command());
    Ok(())
}
