//! # API Error Type
//!
//! Unified error type surfaced to the hosting surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Hosting Surface               Session Layer                            │
//! │  ───────────────               ─────────────                            │
//! │                                                                         │
//! │  add item / create quote                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session method                                                  │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  CoreError (cart limit) ──────────┐                              │  │
//! │  │  ValidationError (terms length) ──┼──► ApiError { code, msg } ──►│  │
//! │  │  BackendError (request failed) ───┘                              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The surface shows `message` and can branch on `code`. Boundary         │
//! │  failures additionally reset the affected state to a safe default       │
//! │  inside the session before the error is returned.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::provider::BackendError;
use quoteflow_core::error::{CoreError, ValidationError};

/// API error returned from session operations.
///
/// ## Serialization
/// What the hosting surface receives when an operation fails:
/// ```json
/// {
///   "code": "CART_LIMIT",
///   "message": "Cart cannot have more than 100 lines"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation (terms too long, zero page size, ...)
    ValidationError,
    /// A cart business limit was hit
    CartLimit,
    /// The referenced record does not exist
    NotFound,
    /// A boundary request failed
    BackendError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                ErrorCode::CartLimit
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        let code = match &err {
            BackendError::NotFound { .. } => ErrorCode::NotFound,
            BackendError::Request(_) => ErrorCode::BackendError,
        };
        ApiError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_maps_to_cart_limit() {
        let err: ApiError = CoreError::CartTooLarge { max: 100 }.into();
        assert_eq!(err.code, ErrorCode::CartLimit);
        assert_eq!(err.message, "Cart cannot have more than 100 lines");
    }

    #[test]
    fn test_backend_not_found_maps_to_not_found() {
        let err: ApiError = BackendError::NotFound {
            entity: "Quote",
            id: "0Q0-1".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let err = ApiError::new(ErrorCode::BackendError, "boom");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains(r#""code":"BACKEND_ERROR""#));
    }
}
