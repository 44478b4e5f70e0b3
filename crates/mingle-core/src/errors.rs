//! Core error type

use thiserror::Error;

/// Errors raised by the foundation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An identifier string could not be parsed.
    #[error("invalid identifier '{0}'")]
    InvalidId(String),
}
