//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── CartError ────────── InvalidQuantity, IndexOutOfRange ──┐   │
//! │         ├── ValidationError ──── checkout form, mode parsing ───────┤   │
//! │         ├── CatalogError ─────── product lookups ───────────────────┼─► │
//! │         ├── SubmissionError ──── order transmission ────────────────┤   │
//! │         └── ConfigError ──────── startup only ──────────────────────┘   │
//! │                                                                         │
//! │  UI receives { "code": "CART_ERROR", "message": "..." }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collaborator failures are logged here, where they are mapped; the core's
//! validation errors are returned as-is because they are expected traffic.

use serde::Serialize;
use storefront_core::{CartError, ValidationError};

use crate::catalog::CatalogError;
use crate::state::ConfigError;
use crate::submission::SubmissionError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CART_ERROR",
///   "message": "Quantity must be at least 1, got 0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
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
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart mutation rejected
    CartError,

    /// Catalog could not be reached
    CatalogError,

    /// Order could not be submitted
    SubmissionError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::LineNotFound(id) => ApiError::not_found("Cart line", &id.to_string()),
            other => ApiError::new(ErrorCode::CartError, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CatalogError::CategoryNotFound(id) => ApiError::not_found("Category", &id),
            too_long @ CatalogError::QueryTooLong { .. } => {
                ApiError::validation(too_long.to_string())
            }
            CatalogError::Unavailable(reason) => {
                // Log the actual cause but return a generic message
                tracing::error!(%reason, "Catalog unavailable");
                ApiError::new(ErrorCode::CatalogError, "The menu is unavailable right now")
            }
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Rejected(reason) => {
                tracing::warn!(%reason, "Order rejected by receiver");
                ApiError::new(
                    ErrorCode::SubmissionError,
                    format!("Order rejected: {}", reason),
                )
            }
            SubmissionError::Unavailable(reason) => {
                tracing::error!(%reason, "Order submission failed");
                ApiError::new(
                    ErrorCode::SubmissionError,
                    "Could not place the order, please try again",
                )
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "Configuration error");
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use storefront_core::LineId;

    use super::*;

    #[test]
    fn test_cart_errors_map_to_cart_code() {
        let err: ApiError = CartError::InvalidQuantity { quantity: 0 }.into();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Quantity must be at least 1, got 0");

        let err: ApiError = CartError::LineNotFound(LineId::from_raw(3)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Cart line not found: #3");
    }

    #[test]
    fn test_unavailable_hides_cause() {
        let err: ApiError = CatalogError::Unavailable("connection refused".to_string()).into();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(!err.message.contains("refused"));

        let err: ApiError = SubmissionError::Unavailable("timeout".to_string()).into();
        assert_eq!(err.code, ErrorCode::SubmissionError);
        assert!(!err.message.contains("timeout"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Product", "sushi");
        assert_eq!(err.to_string(), "[NotFound] Product not found: sushi");
    }
}
