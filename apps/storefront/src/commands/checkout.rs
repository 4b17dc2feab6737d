//! # Checkout Command
//!
//! Turns the session cart into a submitted order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  1. Copy lines + pricing + mode (lock released)                         │
//! │     └── Empty cart? → VALIDATION_ERROR                                  │
//! │                                                                         │
//! │  2. Validate CheckoutDetails for the mode                               │
//! │     └── address required only for delivery                              │
//! │                                                                         │
//! │  3. Build OrderSubmission { order_id: v4, placed_at: now }              │
//! │                                                                         │
//! │  4. submitter.submit(&order).await                                      │
//! │     ├── Ok  → remove the submitted lines, return CheckoutResponse       │
//! │     └── Err → cart untouched, SUBMISSION_ERROR                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is not held across the await. Lines added while the order is in
//! flight were not submitted, so they stay in the cart.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_core::{FulfillmentMode, LineId, Money};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::CartState;
use crate::submission::{CheckoutDetails, OrderSubmission, OrderSubmitter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: Uuid,
    pub reference: String,
    pub estimated_minutes: u32,
    pub fulfillment_mode: FulfillmentMode,
    pub item_count: i64,
    pub total: Money,
}

/// Places the order held in the cart.
pub async fn checkout(
    cart: &CartState,
    submitter: &dyn OrderSubmitter,
    details: CheckoutDetails,
) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");

    let (lines, pricing, mode) =
        cart.with_cart(|c| (c.lines().to_vec(), c.snapshot(), c.fulfillment_mode()));

    if lines.is_empty() {
        return Err(ApiError::validation("Cart is empty"));
    }

    let contact = details.validate(mode)?;

    let order = OrderSubmission {
        order_id: Uuid::new_v4(),
        lines,
        pricing,
        fulfillment_mode: mode,
        contact,
        placed_at: Utc::now(),
    };

    let confirmation = match submitter.submit(&order).await {
        Ok(confirmation) => confirmation,
        Err(err) => {
            warn!(order_id = %order.order_id, error = %err, "Checkout failed, cart kept");
            return Err(err.into());
        }
    };

    let submitted: Vec<LineId> = order.lines.iter().map(|line| line.id).collect();
    if let Err(err) = cart.with_cart_mut(|c| c.remove_lines(&submitted)) {
        warn!(order_id = %order.order_id, error = %err, "Submitted lines left in cart");
    }

    info!(
        order_id = %order.order_id,
        reference = %confirmation.reference,
        total = %pricing.total,
        items = pricing.item_count,
        mode = %mode,
        "Order placed"
    );

    Ok(CheckoutResponse {
        order_id: confirmation.order_id,
        reference: confirmation.reference,
        estimated_minutes: confirmation.estimated_minutes,
        fulfillment_mode: mode,
        item_count: pricing.item_count,
        total: pricing.total,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use storefront_core::{NewLine, PricingRules, ProductSnapshot};

    use super::*;
    use crate::error::ErrorCode;
    use crate::submission::{
        OrderConfirmation, SimulatedSubmitter, SubmissionError, SubmissionResult,
    };

    struct FailingSubmitter;

    #[async_trait]
    impl OrderSubmitter for FailingSubmitter {
        async fn submit(&self, _order: &OrderSubmission) -> SubmissionResult<OrderConfirmation> {
            Err(SubmissionError::Unavailable("kitchen offline".to_string()))
        }
    }

    /// Remembers what it was handed.
    #[derive(Default)]
    struct RecordingSubmitter {
        seen: Mutex<Vec<OrderSubmission>>,
    }

    #[async_trait]
    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, order: &OrderSubmission) -> SubmissionResult<OrderConfirmation> {
            self.seen.lock().unwrap().push(order.clone());
            Ok(OrderConfirmation {
                order_id: order.order_id,
                reference: "ABC123".to_string(),
                estimated_minutes: 30,
            })
        }
    }

    /// Adds a line to the cart while the order is in flight.
    struct BusySessionSubmitter {
        cart: CartState,
    }

    #[async_trait]
    impl OrderSubmitter for BusySessionSubmitter {
        async fn submit(&self, order: &OrderSubmission) -> SubmissionResult<OrderConfirmation> {
            self.cart.with_cart_mut(|c| {
                let bread = ProductSnapshot::new("bread", "Garlic bread", Money::from_cents(450));
                c.add_line(NewLine::new(bread).note("late add")).unwrap();
            });
            Ok(OrderConfirmation {
                order_id: order.order_id,
                reference: "LATE01".to_string(),
                estimated_minutes: 30,
            })
        }
    }

    fn filled_cart() -> CartState {
        let cart = CartState::new(PricingRules::new(Money::from_cents(500)));
        cart.with_cart_mut(|c| {
            let soup = ProductSnapshot::new("soup", "Tomato soup", Money::from_cents(800));
            c.add_line(NewLine::new(soup).quantity(2)).unwrap();
        });
        cart
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            name: "Grace".to_string(),
            phone: "+1 555 0100".to_string(),
            address: Some("1 Harbor Rd".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_checkout_success_clears_cart() {
        let cart = filled_cart();
        let submitter = RecordingSubmitter::default();

        let response = checkout(&cart, &submitter, details()).await.unwrap();

        assert_eq!(response.reference, "ABC123");
        assert_eq!(response.total.cents(), 2100);
        assert_eq!(response.item_count, 2);
        assert_eq!(response.fulfillment_mode, FulfillmentMode::Delivery);
        assert!(cart.with_cart(|c| c.is_empty()));

        let seen = submitter.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].order_id, response.order_id);
        assert_eq!(seen[0].lines.len(), 1);
        assert_eq!(seen[0].contact.address.as_deref(), Some("1 Harbor Rd"));
    }

    #[tokio::test]
    async fn test_lines_added_during_submission_survive() {
        let cart = filled_cart();
        let submitter = BusySessionSubmitter { cart: cart.clone() };

        let response = checkout(&cart, &submitter, details()).await.unwrap();

        assert_eq!(response.item_count, 2);
        cart.with_cart(|c| {
            assert_eq!(c.len(), 1);
            assert_eq!(c.lines()[0].product.id, "bread");
            assert_eq!(c.lines()[0].note.as_deref(), Some("late add"));
            assert_eq!(c.snapshot().subtotal.cents(), 450);
        });
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_cart() {
        let cart = filled_cart();
        let before = cart.with_cart(|c| (c.lines().to_vec(), c.snapshot()));

        let err = checkout(&cart, &FailingSubmitter, details()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SubmissionError);
        assert_eq!(cart.with_cart(|c| (c.lines().to_vec(), c.snapshot())), before);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let cart = CartState::default();
        let submitter = RecordingSubmitter::default();

        let err = checkout(&cart, &submitter, details()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");
        assert!(submitter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_details_never_submitted() {
        let cart = filled_cart();
        let submitter = RecordingSubmitter::default();
        let details = CheckoutDetails {
            address: None,
            ..details()
        };

        let err = checkout(&cart, &submitter, details).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(submitter.seen.lock().unwrap().is_empty());
        assert_eq!(cart.with_cart(|c| c.len()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pickup_checkout_with_simulated_submitter() {
        let cart = filled_cart();
        cart.with_cart_mut(|c| c.set_fulfillment_mode(FulfillmentMode::Pickup));
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500));
        let details = CheckoutDetails {
            address: None,
            ..details()
        };

        let response = checkout(&cart, &submitter, details).await.unwrap();

        assert_eq!(response.total.cents(), 1600);
        assert_eq!(response.estimated_minutes, 20);
        assert!(cart.with_cart(|c| c.is_empty()));
    }
}
