use anyhow::Result;

use super::{CommandResult, CommandSummary, helper::finish};
use crate::{cli::args::ReferencesArgs, core::ScanContext, issues::Finding};

/// Report references to resource entries. Informational: never fails the run.
pub fn references(args: ReferencesArgs) -> Result<CommandResult> {
    let ctx = ScanContext::new(&args.common)?.with_resource_filter(&args.resources)?;

    let mut findings = ctx.reference_findings(args.prefer.as_deref())?;
    findings.extend(ctx.source_errors().iter().cloned().map(Finding::ParseError));
    findings.extend(
        ctx.resources()
            .errors
            .iter()
            .cloned()
            .map(Finding::ParseError),
    );

    Ok(finish(
        CommandSummary::References,
        args.format,
        findings,
        ctx.sources().len(),
        ctx.resources().file_count(),
        false,
    ))
}
