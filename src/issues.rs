//! Findings produced by a scan.
//!
//! Each finding is self-contained with everything a reporter needs: the file,
//! the line of source it sits on and the scanned item itself.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{ItemFlags, LiteralItem, ReferenceItem};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    /// Informational, never fails a run.
    Note,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Rule identifier for each finding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    LocalizableLiteral,
    ResourceReference,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::LocalizableLiteral => write!(f, "localizable-literal"),
            Rule::ResourceReference => write!(f, "resource-reference"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Source Context
// ============================================================

/// Where a finding sits, with the full source line for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(
        file_path: impl Into<String>,
        line: usize,
        col: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
            source_line: source_line.into(),
        }
    }
}

// ============================================================
// Finding Types
// ============================================================

/// String literal that should move to a resource file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizableLiteralFinding {
    pub context: SourceContext,
    pub literal: LiteralItem,
}

impl LocalizableLiteralFinding {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::LocalizableLiteral
    }
}

/// Existing reference to a resource entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReferenceFinding {
    pub context: SourceContext,
    pub reference: ReferenceItem,
}

impl ResourceReferenceFinding {
    pub fn severity() -> Severity {
        Severity::Note
    }

    pub fn rule() -> Rule {
        Rule::ResourceReference
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseErrorFinding {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Finding Enum
// ============================================================

/// A finding produced by one of the scan commands.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Finding {
    LocalizableLiteral(LocalizableLiteralFinding),
    ResourceReference(ResourceReferenceFinding),
    ParseError(ParseErrorFinding),
}

impl Finding {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for static dispatch on the `Finding` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this finding.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional text for the "= value:" line.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Number of characters the finding covers on its line.
    fn width(&self) -> usize {
        1
    }
}

fn flag_notes(flags: ItemFlags) -> Option<String> {
    let mut notes = Vec::new();
    if flags.marked_unlocalizable {
        notes.push("marked with a no-localize comment");
    }
    if flags.within_no_localize_scope {
        notes.push("inside a no-localize scope");
    }
    if flags.from_generated_source {
        notes.push("in generated code");
    }
    (!notes.is_empty()).then(|| notes.join(", "))
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for LocalizableLiteralFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.literal.value.clone()
    }

    fn report_severity(&self) -> Severity {
        // Unlocalizable literals are only reported on request.
        if self.literal.flags.is_unlocalizable() {
            Severity::Warning
        } else {
            Self::severity()
        }
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        flag_notes(self.literal.flags)
    }

    fn width(&self) -> usize {
        self.literal.length
    }
}

impl Report for ResourceReferenceFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.reference.original_text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.reference.value))
    }

    fn details(&self) -> Option<String> {
        let origin = &self.reference.origin;
        let culture = origin.culture.as_deref().unwrap_or("neutral");
        Some(format!(
            "{} in {} [{}]",
            self.reference.full_text, origin.path, culture
        ))
    }

    fn width(&self) -> usize {
        self.reference.length
    }
}

impl Report for ParseErrorFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Finding (for sorting in reports)
// ============================================================

impl Finding {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col,
            ReportLocation::File { .. } => 0,
        }
    }

    /// Sort by file path, line, column, then rule and message.
    pub fn compare(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

// ============================================================
// Tests
// ============================================================
