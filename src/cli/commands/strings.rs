use anyhow::Result;

use super::{CommandResult, CommandSummary, helper::finish};
use crate::{cli::args::StringsArgs, core::ScanContext, issues::Finding};

/// Report string literals that should be localized.
///
/// Localizable literals are errors; unreadable files are warnings.
pub fn strings(args: StringsArgs) -> Result<CommandResult> {
    let ctx = ScanContext::new(&args.common)?;

    let mut findings = ctx.literal_findings(args.include_unlocalizable);
    findings.extend(
        ctx.source_errors()
            .iter()
            .cloned()
            .map(Finding::ParseError),
    );

    Ok(finish(
        CommandSummary::Strings,
        args.format,
        findings,
        ctx.sources().len(),
        0,
        true,
    ))
}
