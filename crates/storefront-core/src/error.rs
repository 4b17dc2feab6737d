//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CartError        - Cart mutation rejected                         │
//! │  └── ValidationError  - Text/enum input validation failures            │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  ├── CatalogError     - Catalog collaborator failures                  │
//! │  ├── SubmissionError  - Order submission failures                      │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: CartError / ValidationError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A mutation that returns a `CartError` has no observable effect.

use thiserror::Error;

use crate::types::LineId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity below one on add or update.
    ///
    /// ## When This Occurs
    /// - `add_line` with quantity 0 or negative
    /// - `set_line_quantity` / `update_quantity` with quantity 0 or negative
    ///
    /// Dropping a line to zero is done with `remove_line`, never with a
    /// zero-quantity update.
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Position does not reference an existing line.
    #[error("Line position {position} is out of range (cart has {len} lines)")]
    IndexOutOfRange { position: usize, len: usize },

    /// Line id is unknown to this cart (removed, cleared, or never issued).
    #[error("Line not found: {0}")]
    LineNotFound(LineId),

    /// Negative manual discount.
    #[error("Discount cannot be negative, got {cents} cents")]
    InvalidDiscount { cents: i64 },

    /// The change would push a quantity, subtotal or total past what a
    /// `Money` can hold.
    #[error("Cart amounts would exceed the supported range")]
    AmountTooLarge,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for checkout details and for parsing UI-provided values into
/// domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., a phone number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CartResult<T> = Result<T, CartError>;

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        let err = CartError::InvalidQuantity { quantity: 0 };
        assert_eq!(err.to_string(), "Quantity must be at least 1, got 0");

        let err = CartError::IndexOutOfRange {
            position: 3,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Line position 3 is out of range (cart has 2 lines)"
        );

        let err = CartError::LineNotFound(LineId::from_raw(7));
        assert_eq!(err.to_string(), "Line not found: #7");

        let err = CartError::InvalidDiscount { cents: -100 };
        assert_eq!(
            err.to_string(),
            "Discount cannot be negative, got -100 cents"
        );

        assert_eq!(
            CartError::AmountTooLarge.to_string(),
            "Cart amounts would exceed the supported range"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::TooLong {
            field: "note".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "note must be at most 500 characters");
    }
}
