use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::OutputFormat,
    issues::{Finding, Severity},
};

pub fn finish(
    summary: CommandSummary,
    format: OutputFormat,
    mut findings: Vec<Finding>,
    source_files_checked: usize,
    resource_files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    findings.sort_by(Finding::compare);

    let parse_error_count = findings
        .iter()
        .filter(|f| matches!(f, Finding::ParseError(_)))
        .count();

    let mut error_count = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();

    let warning_count = findings
        .iter()
        .filter(|f| f.severity() == Severity::Warning)
        .count();

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        format,
        error_count,
        warning_count,
        exit_on_errors,
        findings,
        parse_error_count,
        source_files_checked,
        resource_files_checked,
    }
}
