use crate::{cli::args::OutputFormat, issues::Finding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Strings,
    References,
    Init,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum CommandSummary {
    Strings,
    References,
    Init(InitSummary),
}

impl CommandSummary {
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandSummary::Strings => CommandKind::Strings,
            CommandSummary::References => CommandKind::References,
            CommandSummary::Init(_) => CommandKind::Init,
        }
    }
}

/// Result of running a locscan command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub format: OutputFormat,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (informational commands).
    pub exit_on_errors: bool,
    /// All findings, sorted by location.
    pub findings: Vec<Finding>,
    /// Number of files that could not be read or parsed.
    pub parse_error_count: usize,
    /// Number of code and markup files that were scanned.
    pub source_files_checked: usize,
    /// Number of resource files that were loaded. 0 for `strings`.
    pub resource_files_checked: usize,
}
