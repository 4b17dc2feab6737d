//! # Order Submission Collaborator
//!
//! Hands a finalized order to whatever transmits it (kitchen display,
//! ordering API, ...).
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutDetails ──► validate(mode) ──► OrderSubmission                 │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                              OrderSubmitter::submit() (async)           │
//! │                                │                   │                    │
//! │                         Ok(confirmation)     Err(SubmissionError)       │
//! │                                │                   │                    │
//! │                                ▼                   ▼                    │
//! │                          cart.clear()        cart untouched             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::validation::{
    normalize_optional, validate_max_len, validate_phone, validate_required,
};
use storefront_core::{
    FulfillmentMode, OrderLine, PricingSnapshot, ValidationError, ValidationResult,
};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// Checkout Details
// =============================================================================

/// Contact and delivery details from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub name: String,
    pub phone: String,
    /// Required for delivery, ignored otherwise.
    #[serde(default)]
    pub address: Option<String>,
    /// Order-level note for the store.
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutDetails {
    /// Validates and normalizes the details for a fulfillment mode.
    ///
    /// ## Rules
    /// - `name`: required, at most 100 characters
    /// - `phone`: see [`validate_phone`]
    /// - `address`: required for delivery, dropped for pickup and dine-in
    /// - `notes`: optional, at most 500 characters
    pub fn validate(self, mode: FulfillmentMode) -> ValidationResult<CheckoutDetails> {
        let name = validate_required("name", &self.name)?;
        validate_max_len("name", &name, MAX_NAME_LEN)?;

        let phone = validate_phone(&self.phone)?;

        let address = if mode.charges_delivery_fee() {
            let address = normalize_optional(self.address).ok_or(ValidationError::Required {
                field: "address".to_string(),
            })?;
            validate_max_len("address", &address, MAX_ADDRESS_LEN)?;
            Some(address)
        } else {
            None
        };

        let notes = normalize_optional(self.notes);
        if let Some(notes) = &notes {
            validate_max_len("notes", notes, MAX_NOTES_LEN)?;
        }

        Ok(CheckoutDetails {
            name,
            phone,
            address,
            notes,
        })
    }
}

// =============================================================================
// Submission Payload
// =============================================================================

/// Everything the submission collaborator receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub order_id: Uuid,
    pub lines: Vec<OrderLine>,
    pub pricing: PricingSnapshot,
    pub fulfillment_mode: FulfillmentMode,
    pub contact: CheckoutDetails,
    pub placed_at: DateTime<Utc>,
}

/// Acknowledgement from the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    /// Short code shown to the customer, e.g. "A1B2C3".
    pub reference: String,
    /// Estimated minutes until ready / delivered.
    pub estimated_minutes: u32,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The receiver refused the order (closed, out of area, ...).
    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;

// =============================================================================
// Trait
// =============================================================================

#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, order: &OrderSubmission) -> SubmissionResult<OrderConfirmation>;
}

// =============================================================================
// Simulated Submitter
// =============================================================================

/// Confirms every order after a fixed delay. Stands in for a real
/// transport during development.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        SimulatedSubmitter { delay }
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedSubmitter {
    async fn submit(&self, order: &OrderSubmission) -> SubmissionResult<OrderConfirmation> {
        tokio::time::sleep(self.delay).await;

        let reference = order.order_id.simple().to_string()[..6].to_uppercase();
        let estimated_minutes = match order.fulfillment_mode {
            FulfillmentMode::Delivery => 45,
            FulfillmentMode::Pickup => 20,
            FulfillmentMode::DineIn => 15,
        };

        info!(
            order_id = %order.order_id,
            %reference,
            lines = order.lines.len(),
            "Simulated order accepted"
        );

        Ok(OrderConfirmation {
            order_id: order.order_id,
            reference,
            estimated_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            name: " Ada Lovelace ".to_string(),
            phone: "555-0102".to_string(),
            address: Some(" 12 Analytical Way ".to_string()),
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_delivery_requires_address() {
        let valid = details().validate(FulfillmentMode::Delivery).unwrap();
        assert_eq!(valid.name, "Ada Lovelace");
        assert_eq!(valid.address.as_deref(), Some("12 Analytical Way"));
        assert_eq!(valid.notes, None);

        let no_address = CheckoutDetails {
            address: None,
            ..details()
        };
        assert_eq!(
            no_address.validate(FulfillmentMode::Delivery).unwrap_err(),
            ValidationError::Required {
                field: "address".to_string()
            }
        );
    }

    #[test]
    fn test_pickup_drops_address() {
        let no_address = CheckoutDetails {
            address: None,
            ..details()
        };
        let valid = no_address.validate(FulfillmentMode::Pickup).unwrap();
        assert_eq!(valid.address, None);

        let valid = details().validate(FulfillmentMode::DineIn).unwrap();
        assert_eq!(valid.address, None);
    }

    #[test]
    fn test_name_and_phone_required() {
        let nameless = CheckoutDetails {
            name: String::new(),
            ..details()
        };
        assert!(nameless.validate(FulfillmentMode::Pickup).is_err());

        let bad_phone = CheckoutDetails {
            phone: "ring ring".to_string(),
            ..details()
        };
        assert!(matches!(
            bad_phone.validate(FulfillmentMode::Pickup),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_notes_length_cap() {
        let chatty = CheckoutDetails {
            notes: Some("x".repeat(MAX_NOTES_LEN + 1)),
            ..details()
        };
        assert!(matches!(
            chatty.validate(FulfillmentMode::Pickup),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_waits_then_confirms() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500));
        let order = OrderSubmission {
            order_id: Uuid::new_v4(),
            lines: Vec::new(),
            pricing: PricingSnapshot::empty(),
            fulfillment_mode: FulfillmentMode::Pickup,
            contact: details(),
            placed_at: Utc::now(),
        };

        let started = tokio::time::Instant::now();
        let confirmation = submitter.submit(&order).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(confirmation.order_id, order.order_id);
        assert_eq!(confirmation.reference.len(), 6);
        assert_eq!(confirmation.estimated_minutes, 20);
    }
}
