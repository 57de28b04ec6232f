use std::fmt;

use thiserror::Error;

/// Error type shared across demotron crates.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Credentials or configuration are missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// An argument failed local validation; no remote call was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The warehouse rejected or failed a request.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Convenience alias for results returned by demotron crates.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Classification of a failure reported by the remote warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    NotFound,
    PermissionDenied,
    SchemaMismatch,
    Transient,
    Unknown,
}

impl RemoteErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteErrorKind::NotFound => "not found",
            RemoteErrorKind::PermissionDenied => "permission denied",
            RemoteErrorKind::SchemaMismatch => "schema mismatch",
            RemoteErrorKind::Transient => "transient failure",
            RemoteErrorKind::Unknown => "unknown failure",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure surfaced by the warehouse, carrying the service message verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("remote error ({kind}): {message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
