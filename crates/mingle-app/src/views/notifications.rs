//! Toast notifications
//!
//! Collaborator failures are surfaced to the user as toasts, verbatim and
//! without retry. Severity routing from error categories lives in
//! [`crate::errors`].

use serde::{Deserialize, Serialize};

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToastLevel {
    /// Informational message.
    #[default]
    Info,
    /// Confirmation of a completed action.
    Success,
    /// Something degraded but recoverable.
    Warning,
    /// An action failed.
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity level.
    pub level: ToastLevel,
    /// Human-readable message, shown as-is.
    pub message: String,
}

impl Toast {
    /// Build an informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    /// Build a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// Build an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}
