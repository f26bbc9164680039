use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_localizable_literal() -> Result<()> {
    let test = CliTest::with_file(
        "Program.cs",
        r#"class Program
{
    static void Main()
    {
        Console.WriteLine("Hello, World!");
    }
}
"#,
    )?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "Program.cs",
        r#"class Program
{
    // "not a literal"
    static int Answer() => 42;
    static char C() => 'x';
    static string Name() => $"{Answer()}";
}
"#,
    )?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_no_localize_comment() -> Result<()> {
    let test = CliTest::with_file(
        "Keys.cs",
        r#"class Keys
{
    const string Registry = /*VL_NO_LOC*/ @"Software\Contoso";
    const string Title = "Contoso";
}
"#,
    )?;

    assert_cmd_snapshot!(test.strings_command());

    let mut cmd = test.strings_command();
    cmd.arg("--include-unlocalizable");
    assert_cmd_snapshot!(cmd);
    Ok(())
}

#[test]
fn test_visual_basic_and_markup() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Module1.vb",
        "Module Module1\n    Sub Main()\n        MsgBox(\"Say \"\"hi\"\"\") ' \"comment\"\n    \
         End Sub\nEnd Module\n",
    )?;
    test.write_file(
        "Default.aspx",
        "<%@ Page Language=\"C#\" %>\n<html>\n<body><%= \"Welcome\" %></body>\n</html>\n",
    )?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_interpolation_holes() -> Result<()> {
    let test = CliTest::with_file(
        "Greeter.cs",
        r#"class Greeter
{
    string Greet(string name) => $"Hi {Format(name, "G")}!";
    string Label() => "Greeting";
}
"#,
    )?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_config_ignores_and_texts() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".locscanrc.json",
        r#"{
         "ignores": ["**/Migrations/**"],
         "ignoreTexts": ["OK"]
     }"#,
    )?;
    test.write_file("Migrations/Init.cs", r#"var sql = "CREATE TABLE";"#)?;
    test.write_file("Dialog.cs", "var ok = \"OK\";\nvar cancel = \"Cancel\";\n")?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_generated_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Form1.Designer.cs", r#"this.button1.Text = "Save";"#)?;

    assert_cmd_snapshot!(test.strings_command());

    test.write_file(".locscanrc.json", r#"{ "ignoreGeneratedFiles": true }"#)?;
    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_file("A.cs", "var s = @\"a\"\"b\";\n")?;

    let mut cmd = test.strings_command();
    cmd.args(["--format", "json"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["errorCount"], 1);
    let literal = &json["findings"][0]["literal"];
    assert_eq!(literal["value"], "a\"b");
    assert_eq!(literal["text"], "@\"a\"\"b\"");
    assert_eq!(literal["verbatim"], true);
    assert_eq!(literal["offset"], 8);
    assert_eq!(literal["length"], 7);
    assert_eq!(literal["span"]["start"]["line"], 1);
    assert_eq!(literal["span"]["start"]["column"], 9);

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".locscanrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    assert_cmd_snapshot!(test.strings_command());
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    assert_cmd_snapshot!(cmd);
    Ok(())
}
