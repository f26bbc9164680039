//! Items produced by a scan.
//!
//! Every item carries a line/column [`Span`] plus the absolute offset and
//! length of the token, which is what callers need to replace the text in
//! place or to navigate to it.

use std::sync::Arc;

use serde::Serialize;

use crate::core::{position::Span, resource::ResourceOrigin};

/// Flags attached to result items. The scanner only reports them; deciding
/// what to do with an unlocalizable item is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFlags {
    /// The scanned block sits in a region where localization is disabled.
    pub within_no_localize_scope: bool,
    /// A no-localize comment directly precedes the literal.
    pub marked_unlocalizable: bool,
    /// The text comes from a generated (designer) file.
    pub from_generated_source: bool,
}

impl ItemFlags {
    /// Whether any flag says the item should stay as it is.
    pub fn is_unlocalizable(&self) -> bool {
        self.within_no_localize_scope || self.marked_unlocalizable
    }
}

/// A string literal found in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralItem {
    /// Source text of the literal, including delimiters and prefix (`@"a""b"`).
    pub text: String,
    /// Value after escape decoding (`a"b`).
    pub value: String,
    pub span: Span,
    pub offset: usize,
    pub length: usize,
    pub verbatim: bool,
    pub flags: ItemFlags,
}

/// A reference to a resource entry found in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    /// Dotted reference as written, without comments or whitespace.
    pub original_text: String,
    /// `Namespace.Class.Key` of the resolved resource.
    pub full_text: String,
    /// Resolved resource key.
    pub key: String,
    /// Value of the resolved resource entry.
    pub value: String,
    pub origin: Arc<ResourceOrigin>,
    pub span: Span,
    pub offset: usize,
    pub length: usize,
    pub flags: ItemFlags,
}

/// Either kind of result, for callers that handle both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultItem {
    Literal(LiteralItem),
    Reference(ReferenceItem),
}

impl ResultItem {
    pub fn span(&self) -> Span {
        match self {
            ResultItem::Literal(item) => item.span,
            ResultItem::Reference(item) => item.span,
        }
    }

    pub fn flags(&self) -> ItemFlags {
        match self {
            ResultItem::Literal(item) => item.flags,
            ResultItem::Reference(item) => item.flags,
        }
    }
}

impl From<LiteralItem> for ResultItem {
    fn from(item: LiteralItem) -> Self {
        ResultItem::Literal(item)
    }
}

impl From<ReferenceItem> for ResultItem {
    fn from(item: ReferenceItem) -> Self {
        ResultItem::Reference(item)
    }
}
