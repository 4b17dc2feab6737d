//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductSnapshot │◄──│    OrderLine    │   │ PricingSnapshot │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (LineId)    │   │  item_count     │       │
//! │  │  name           │   │  product        │   │  subtotal       │       │
//! │  │  unit_price     │   │  quantity ≥ 1   │   │  delivery_fee   │       │
//! │  │  discount meta  │   │  extras, note   │   │  discount       │       │
//! │  └─────────────────┘   └─────────────────┘   │  total          │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐                                                   │
//! │  │ FulfillmentMode │  Delivery (default) │ Pickup │ DineIn             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line holds a frozen copy of the product as it was when added. The cart
//! never goes back to the catalog, so later price changes do not reach lines
//! already in the cart.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Line Identity
// =============================================================================

/// Stable identifier of a cart line.
///
/// Issued by the cart store from a monotonic counter. Unlike a line's
/// position, an id survives removal of other lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineId(u64);

impl LineId {
    /// Wraps a raw id, e.g. one echoed back by a UI.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        LineId(raw)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Discount metadata shown next to a product.
///
/// Display-only: the pricing function never applies it. The frozen
/// `unit_price` is already the price the customer pays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountMeta {
    /// Badge text, e.g. "Happy hour".
    pub label: Option<String>,
    /// Price before the promotion, for strike-through display.
    pub original_price: Option<Money>,
    /// Promotion size in basis points (1500 = 15% off).
    pub percent_off_bps: Option<u32>,
}

/// Catalog data frozen at the moment a product is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Catalog product id.
    pub id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Image reference (URL or asset key).
    pub image_ref: Option<String>,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    pub discount: Option<DiscountMeta>,

    /// Whether the product accepts extras.
    pub is_customizable: bool,

    /// Extras offered by the catalog. Informational; selected extras are
    /// free text and are not checked against this list.
    pub available_extras: Vec<String>,
}

impl ProductSnapshot {
    /// Minimal snapshot with just an id, name and price.
    ///
    /// ```rust
    /// use storefront_core::{Money, ProductSnapshot};
    ///
    /// let burger = ProductSnapshot::new("burger", "Cheeseburger", Money::from_cents(2500));
    /// assert_eq!(burger.unit_price.cents(), 2500);
    /// assert!(!burger.is_customizable);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        ProductSnapshot {
            id: id.into(),
            name: name.into(),
            image_ref: None,
            unit_price,
            discount: None,
            is_customizable: false,
            available_extras: Vec::new(),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One entry in the cart.
///
/// ## Invariants
/// - `quantity >= 1` at all times; a line goes away through removal
/// - `product.unit_price` never changes after the line is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: LineId,

    /// Frozen product data.
    pub product: ProductSnapshot,

    pub quantity: i64,

    /// Extra labels in selection order. Duplicates are kept.
    pub selected_extras: Vec<String>,

    /// Customer instruction, e.g. "no onions".
    pub note: Option<String>,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl OrderLine {
    /// Unit price × quantity, using the frozen price.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Fulfillment Mode
// =============================================================================

/// How the order will be received.
///
/// Only `Delivery` carries a delivery fee. Modes are independent settings:
/// any mode may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum FulfillmentMode {
    #[default]
    Delivery,
    Pickup,
    DineIn,
}

impl FulfillmentMode {
    pub const ALL: [FulfillmentMode; 3] = [
        FulfillmentMode::Delivery,
        FulfillmentMode::Pickup,
        FulfillmentMode::DineIn,
    ];

    /// Wire name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FulfillmentMode::Delivery => "delivery",
            FulfillmentMode::Pickup => "pickup",
            FulfillmentMode::DineIn => "dineIn",
        }
    }

    #[inline]
    pub const fn charges_delivery_fee(&self) -> bool {
        matches!(self, FulfillmentMode::Delivery)
    }
}

impl fmt::Display for FulfillmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentMode {
    type Err = ValidationError;

    /// Accepts `delivery`, `pickup`, `dineIn`, `dine-in` and `dine_in`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Ok(FulfillmentMode::Delivery),
            "pickup" => Ok(FulfillmentMode::Pickup),
            "dinein" | "dine-in" | "dine_in" => Ok(FulfillmentMode::DineIn),
            _ => Err(ValidationError::NotAllowed {
                field: "fulfillment mode".to_string(),
                allowed: FulfillmentMode::ALL
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Pricing Snapshot
// =============================================================================

/// Derived monetary totals for one cart state.
///
/// Never mutated field by field: the store replaces the whole value after
/// each mutation, so readers always see a consistent set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    /// Sum of line quantities.
    pub item_count: i64,
    /// Sum of frozen unit price × quantity.
    pub subtotal: Money,
    /// Flat fee in delivery mode, zero otherwise.
    pub delivery_fee: Money,
    /// Manual order-level discount.
    pub discount: Money,
    /// `subtotal + delivery_fee - discount`, not clamped.
    pub total: Money,
}

impl PricingSnapshot {
    /// Snapshot of an empty cart with no fee and no discount.
    pub const fn empty() -> Self {
        PricingSnapshot {
            item_count: 0,
            subtotal: Money::zero(),
            delivery_fee: Money::zero(),
            discount: Money::zero(),
            total: Money::zero(),
        }
    }

    /// True when the discount exceeds subtotal plus fee.
    #[inline]
    pub const fn is_negative_total(&self) -> bool {
        self.total.is_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
