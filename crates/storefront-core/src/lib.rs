//! # storefront-core: Cart & Pricing Engine
//!
//! This crate is the **heart** of the storefront. It holds the in-progress
//! order and recomputes its totals on every mutation, as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI surfaces                                  │   │
//! │  │    Menu ──► Product detail ──► Cart ──► Checkout form          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront app commands                      │   │
//! │  │    add_to_cart, set_fulfillment_mode, checkout, etc.           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │ OrderLine │  │   Money   │  │ CartStore │  │price_cart │  │   │
//! │  │   │ Snapshot  │  │           │  │  NewLine  │  │   Rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSnapshot, OrderLine, FulfillmentMode, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Pure pricing function and store pricing rules
//! - [`cart`] - The cart store
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartStore, Money, NewLine, PricingRules, ProductSnapshot};
//!
//! let mut cart = CartStore::new(PricingRules::new(Money::from_cents(500)));
//! let wrap = ProductSnapshot::new("wrap", "Falafel wrap", Money::from_cents(2500));
//!
//! cart.add_line(NewLine::new(wrap).quantity(2)).unwrap();
//! cart.set_discount(Money::from_cents(1000)).unwrap();
//!
//! // $50.00 + $5.00 delivery - $10.00 discount
//! assert_eq!(cart.snapshot().total.cents(), 4500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartStore, NewLine};
pub use error::{CartError, CartResult, ValidationError, ValidationResult};
pub use money::Money;
pub use pricing::{price_cart, PricingRules};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat delivery fee used when the store configures none ($5.00).
pub const DEFAULT_DELIVERY_FEE: Money = Money::from_cents(500);
