use thiserror::Error;

/// Errors raised by scan entry points.
///
/// Malformed source text is never an error: unterminated tokens are dropped
/// and unresolved references are treated as non-matches.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller-supplied namespace table could not be used.
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl ScanError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Errors raised while consulting a [`NamespaceScope`](crate::core::NamespaceScope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("alias '{alias}' maps to malformed namespace '{target}'")]
    MalformedAlias { alias: String, target: String },

    #[error("malformed namespace '{0}' in scope")]
    MalformedNamespace(String),
}
