//! # Validation Module
//!
//! Input validation for cart mutations and checkout details.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                            │
//! │  ├── Quantity stepper never goes below 1                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart store (THIS MODULE)                                      │
//! │  ├── validate_quantity / validate_discount before any write             │
//! │  └── Rejects with CartError, cart untouched                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout                                                      │
//! │  └── validate_required / validate_max_len / validate_phone              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CartError, CartResult, ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1
///
/// ```rust
/// use storefront_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> CartResult<()> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity { quantity });
    }

    Ok(())
}

/// Validates a manual discount.
///
/// ## Rules
/// - Must be non-negative (zero clears the discount)
/// - No upper bound: a discount above subtotal plus fee is accepted
pub fn validate_discount(discount: Money) -> CartResult<()> {
    if discount.is_negative() {
        return Err(CartError::InvalidDiscount {
            cents: discount.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Returns
/// The trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a maximum length in characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Normalizes optional free text: blank becomes `None`, anything else is
/// trimmed.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Required
/// - Digits plus `+`, spaces, hyphens and parentheses only
/// - At least 6 digits
///
/// ```rust
/// use storefront_core::validation::validate_phone;
///
/// assert!(validate_phone("+1 (555) 010-2030").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = validate_required("phone", phone)?;

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, '+', '-', '(' and ')'".to_string(),
        });
    }

    if phone.chars().filter(char::is_ascii_digit).count() < 6 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 6 digits".to_string(),
        });
    }

    Ok(phone)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10_000).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(CartError::InvalidQuantity { quantity: 0 })
        );
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(Money::zero()).is_ok());
        assert!(validate_discount(Money::from_cents(1_000_000)).is_ok());
        assert_eq!(
            validate_discount(Money::from_cents(-1)),
            Err(CartError::InvalidDiscount { cents: -1 })
        );
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "  Ada ").unwrap(), "Ada");
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_max_len_counts_chars() {
        assert!(validate_max_len("note", "café", 4).is_ok());
        assert!(validate_max_len("note", "cafés", 4).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" extra crispy ".to_string())),
            Some("extra crispy".to_string())
        );
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone(" 555-0102 ").unwrap(), "555-0102");
        assert!(validate_phone("").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
        assert!(validate_phone("12345").is_err());
    }
}
