//! # Pricing
//!
//! The pure function from cart state to [`PricingSnapshot`].
//!
//! ## Recompute Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (lines, mode, discount, rules)                                         │
//! │       │                                                                 │
//! │       ├── 1. item_count   = Σ quantity                                  │
//! │       ├── 2. subtotal     = Σ frozen unit_price × quantity              │
//! │       ├── 3. delivery_fee = rules.delivery_fee if Delivery, else 0      │
//! │       └── 4. total        = subtotal + delivery_fee − discount          │
//! │       │                                                                 │
//! │       ├── any amount outside i64 cents ──► None                         │
//! │       ▼                                                                 │
//! │  PricingSnapshot (built in one expression, never partially updated)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is NOT clamped at zero. A discount larger than subtotal plus
//! fee yields a negative total that callers can detect with
//! [`PricingSnapshot::is_negative_total`].

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{FulfillmentMode, OrderLine, PricingSnapshot};
use crate::DEFAULT_DELIVERY_FEE;

/// Store-level pricing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRules {
    /// Flat fee charged in delivery mode.
    pub delivery_fee: Money,
}

impl PricingRules {
    pub const fn new(delivery_fee: Money) -> Self {
        PricingRules { delivery_fee }
    }

    /// Fee for the given mode.
    #[inline]
    pub const fn delivery_fee_for(&self, mode: FulfillmentMode) -> Money {
        if mode.charges_delivery_fee() {
            self.delivery_fee
        } else {
            Money::zero()
        }
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules::new(DEFAULT_DELIVERY_FEE)
    }
}

/// Computes the pricing snapshot for a cart state.
///
/// Returns `None` when any amount leaves the `i64` cent range. The check
/// also covers the total in the other fulfillment modes and the total with
/// no lines, so a cart that prices now can still switch mode or be cleared.
///
/// ```rust
/// use storefront_core::pricing::{price_cart, PricingRules};
/// use storefront_core::{FulfillmentMode, Money};
///
/// let rules = PricingRules::new(Money::from_cents(500));
/// let snapshot = price_cart(&[], FulfillmentMode::Delivery, Money::from_cents(1000), &rules)
///     .expect("small amounts fit");
/// assert_eq!(snapshot.total.cents(), -500);
/// ```
pub fn price_cart(
    lines: &[OrderLine],
    mode: FulfillmentMode,
    discount: Money,
    rules: &PricingRules,
) -> Option<PricingSnapshot> {
    let mut item_count: i64 = 0;
    let mut subtotal = Money::zero();
    for line in lines {
        item_count = item_count.checked_add(line.quantity)?;
        let line_total = line.product.unit_price.checked_multiply_quantity(line.quantity)?;
        subtotal = subtotal.checked_add(line_total)?;
    }

    let fee = i128::from(rules.delivery_fee.cents());
    let discount_cents = i128::from(discount.cents());
    let with_fee = |base: i128| i64::try_from(base + fee - discount_cents).ok();
    let without_fee = |base: i128| i64::try_from(base - discount_cents).ok();

    let base = i128::from(subtotal.cents());
    let delivery_total = with_fee(base)?;
    let counter_total = without_fee(base)?;
    // Headroom for clear()
    with_fee(0)?;
    without_fee(0)?;

    let total = if mode.charges_delivery_fee() {
        delivery_total
    } else {
        counter_total
    };

    Some(PricingSnapshot {
        item_count,
        subtotal,
        delivery_fee: rules.delivery_fee_for(mode),
        discount,
        total: Money::from_cents(total),
    })
}
