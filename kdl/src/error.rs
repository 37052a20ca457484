//! Error types for KDL parsing.
//!
//! Three kinds of failure are distinguished: the input violating the grammar,
//! the parser observing a state it believed impossible, and the underlying
//! character source failing. The top-level parse appends the context's
//! location snapshot to whichever of these escapes.

use std::io;

use thiserror::Error;

/// Result type alias using [`KdlError`].
pub type Result<T> = std::result::Result<T, KdlError>;

/// Errors produced while parsing a KDL document.
#[derive(Debug, Error)]
pub enum KdlError {
    /// The input text violates the KDL grammar.
    #[error("parse error: {0}")]
    Parse(String),

    /// The parser reached a state that should be impossible. This indicates
    /// a bug in the parser, not a problem with the input.
    #[error("internal parser error: {0}")]
    Internal(String),

    /// The character source failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

impl KdlError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        KdlError::Parse(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        KdlError::Internal(message.into())
    }

    /// Appends a location snapshot to the error message.
    pub(crate) fn with_location(self, location: &str) -> Self {
        match self {
            KdlError::Parse(message) => KdlError::Parse(format!("{}\n{}", message, location)),
            KdlError::Internal(message) => {
                KdlError::Internal(format!("{}\n{}", message, location))
            }
            KdlError::Io(err) => {
                let kind = err.kind();
                KdlError::Io(io::Error::new(kind, format!("{}\n{}", err, location)))
            }
        }
    }
}
