//! Categorized application errors
//!
//! The error taxonomy here is deliberately shallow: validation problems are
//! absorbed at the boundary (an invalid filter field is treated as unset),
//! collaborator failures are surfaced verbatim as toasts, and malformed local
//! intents are silently ignored. Nothing is fatal; every error is recoverable
//! by the user retrying the originating action.

use crate::views::notifications::ToastLevel;
use std::fmt;

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by the user).
    Input,
    /// Resource not found (a record disappeared under the screen).
    NotFound,
    /// Backend connectivity or rejection (often transient).
    Network,
    /// General operation failures (catch-all).
    Operation,
}

impl ErrorCategory {
    /// Whether the user can resolve this error by fixing their input.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input)
    }

    /// Whether this error may resolve on a manual retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network | Self::NotFound)
    }

    /// The toast severity appropriate for this category.
    #[must_use]
    pub fn toast_severity(&self) -> ToastLevel {
        match self {
            Self::Input => ToastLevel::Info,
            Self::NotFound => ToastLevel::Warning,
            Self::Network => ToastLevel::Warning,
            Self::Operation => ToastLevel::Error,
        }
    }

    /// A short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::NotFound => "Not Found",
            Self::Network => "Network",
            Self::Operation => "Operation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_user_correctable() {
        assert!(ErrorCategory::Input.is_user_correctable());
        assert!(!ErrorCategory::Network.is_user_correctable());
    }

    #[test]
    fn network_and_not_found_are_transient() {
        assert!(ErrorCategory::Network.is_transient());
        assert!(ErrorCategory::NotFound.is_transient());
        assert!(!ErrorCategory::Operation.is_transient());
    }

    #[test]
    fn severity_routing() {
        assert_eq!(ErrorCategory::Operation.toast_severity(), ToastLevel::Error);
        assert_eq!(ErrorCategory::Network.toast_severity(), ToastLevel::Warning);
    }
}
