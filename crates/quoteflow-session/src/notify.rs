//! # Notifications
//!
//! The non-blocking user-facing messages of the flow (the toast analog).
//! Sessions RETURN notifications; how they are displayed is the hosting
//! surface's concern, never decided inside a boundary call.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            variant: Variant::Success,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            variant: Variant::Warning,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            variant: Variant::Error,
        }
    }
}

/// Every ApiError can be shown to the user as-is.
impl From<&ApiError> for Notification {
    fn from(err: &ApiError) -> Self {
        Notification::error("Error", err.message.clone())
    }
}
