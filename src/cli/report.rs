//! Report formatting and printing utilities.
//!
//! Findings are printed cargo-style, or as a single JSON document with
//! `--format json`. Kept apart from the scanning core so locscan can be used
//! as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandKind, CommandResult, CommandSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Finding, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stdout.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
///
/// Findings are expected in display order (see [`Finding::compare`]).
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    if findings.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(findings);

    for finding in findings {
        print_finding(finding, writer, max_line_width);
    }

    print_summary(findings, writer);
}

/// Print a success message when nothing was found.
pub fn print_success_to<W: Write>(result: &CommandResult, writer: &mut W) {
    let files = |n: usize| if n == 1 { "file" } else { "files" };
    let what = match result.summary.kind() {
        CommandKind::References => "no resource references found",
        _ => "no localizable strings found",
    };

    let checked = if result.resource_files_checked == 0 {
        format!(
            "Scanned {} source {}",
            result.source_files_checked,
            files(result.source_files_checked)
        )
    } else {
        format!(
            "Scanned {} source {}, {} resource {}",
            result.source_files_checked,
            files(result.source_files_checked),
            result.resource_files_checked,
            files(result.resource_files_checked)
        )
    };

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} - {}", checked, what).green()
    );
}

/// Print a warning about files that could not be read or parsed.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFinding<'a> {
    rule: String,
    severity: Severity,
    #[serde(flatten)]
    finding: &'a Finding,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    findings: Vec<JsonFinding<'a>>,
    error_count: usize,
    warning_count: usize,
    source_files_checked: usize,
    resource_files_checked: usize,
}

/// Render the findings of a command as one JSON document.
pub fn render_json(result: &CommandResult) -> serde_json::Result<String> {
    let report = JsonReport {
        findings: result
            .findings
            .iter()
            .map(|finding| JsonFinding {
                rule: finding.rule().to_string(),
                severity: finding.severity(),
                finding,
            })
            .collect(),
        error_count: result.error_count,
        warning_count: result.warning_count,
        source_files_checked: result.source_files_checked,
        resource_files_checked: result.resource_files_checked,
    };
    serde_json::to_string_pretty(&report)
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Note => "note".bold().cyan(),
    }
}

fn print_finding<W: Write>(finding: &Finding, writer: &mut W, max_line_width: usize) {
    let severity = finding.report_severity();

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_label(severity),
        finding.message(),
        finding.report_rule().to_string().dimmed().cyan()
    );

    match finding.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path,
                ctx.line,
                ctx.col
            );
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                ctx.line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            // Underline the token, clipped to the end of the line.
            let before = ctx.col.saturating_sub(1);
            let prefix: String = ctx.source_line.chars().take(before).collect();
            let token: String = ctx
                .source_line
                .chars()
                .skip(before)
                .take(finding.width())
                .collect();
            let underline = "^".repeat(UnicodeWidthStr::width(token.as_str()).max(1));
            let underline = match severity {
                Severity::Error => underline.red(),
                Severity::Warning => underline.yellow(),
                Severity::Note => underline.cyan(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                underline,
                width = max_line_width,
                padding = UnicodeWidthStr::width(prefix.as_str())
            );
        }
    }

    if let Some(details) = finding.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = finding.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "value:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(findings: &[Finding], writer: &mut W) {
    let count = |severity: Severity| {
        findings
            .iter()
            .filter(|f| f.report_severity() == severity)
            .count()
    };
    let total_errors = count(Severity::Error);
    let total_warnings = count(Severity::Warning);
    let total_notes = count(Severity::Note);

    if total_errors + total_warnings > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_errors + total_warnings,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
    if total_notes > 0 {
        let _ = writeln!(
            writer,
            "{} {} resource {}",
            SUCCESS_MARK.green(),
            total_notes,
            if total_notes == 1 {
                "reference"
            } else {
                "references"
            }
        );
    }
}

fn calculate_max_line_width(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter_map(|f| match f.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), error);
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    if let CommandSummary::Init(summary) = &result.summary {
        if summary.created {
            print_init_to(summary, &mut io::stdout().lock());
        } else {
            print_init_to(summary, &mut io::stderr().lock());
        }
        return;
    }

    if result.format == OutputFormat::Json {
        match render_json(result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} failed to render JSON: {}", "error:".bold().red(), e),
        }
        return;
    }

    report(&result.findings);
    if result.findings.is_empty() {
        print_success_to(result, &mut io::stdout().lock());
    }
    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

// ============================================================
// Tests
// ============================================================
