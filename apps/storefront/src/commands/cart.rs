//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                             │             │
//! │       │           update_cart_line                        │             │
//! │       │           remove_from_cart                        │             │
//! │       │           set_fulfillment_mode / set_discount     │             │
//! │       │                │                                  │             │
//! │       └──── clear_cart ┘◄───── (checkout clears) ─────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the full [`CartResponse`] so a UI can re-render
//! from one consistent value.

use serde::{Deserialize, Serialize};
use storefront_core::validation::validate_quantity;
use storefront_core::{
    CartStore, FulfillmentMode, LineId, Money, NewLine, OrderLine, PricingSnapshot,
};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::state::CartState;

/// Cart contents plus pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<OrderLine>,
    pub pricing: PricingSnapshot,
    pub fulfillment_mode: FulfillmentMode,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            pricing: cart.snapshot(),
            fulfillment_mode: cart.fulfillment_mode(),
        }
    }
}

/// Parameters for [`add_to_cart`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl AddToCartRequest {
    pub fn new(product_id: impl Into<String>) -> Self {
        AddToCartRequest {
            product_id: product_id.into(),
            ..Default::default()
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart as a new line.
///
/// ## Behavior
/// - The product is fetched from the catalog once and frozen
/// - Adding a product already in the cart creates a second line
/// - Quantity is checked before the catalog is called
///
/// ```text
/// add_to_cart({ productId: "burger", quantity: 2, extras: ["bacon"] })
///      │
///      ├── validate quantity ── < 1? → CART_ERROR
///      ├── catalog.product(id) ── unknown? → NOT_FOUND
///      ├── snapshot() (price frozen here)
///      └── cart.add_line(..) → CartResponse
/// ```
pub async fn add_to_cart(
    catalog: &dyn Catalog,
    cart: &CartState,
    request: AddToCartRequest,
) -> Result<CartResponse, ApiError> {
    let quantity = request.quantity.unwrap_or(1);
    debug!(
        product_id = %request.product_id,
        quantity,
        extras = request.extras.len(),
        "add_to_cart command"
    );

    validate_quantity(quantity)?;

    let product = catalog.product(&request.product_id).await?;

    let mut line = NewLine::new(product.snapshot())
        .quantity(quantity)
        .extras(request.extras);
    if let Some(note) = request.note {
        line = line.note(note);
    }

    cart.with_cart_mut(|c| {
        c.add_line(line)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Sets the quantity of a line. Quantity must be at least 1; use
/// [`remove_from_cart`] to drop a line.
pub fn update_cart_line(
    cart: &CartState,
    line_id: LineId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(%line_id, quantity, "update_cart_line command");

    cart.with_cart_mut(|c| {
        c.update_quantity(line_id, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Stepper "+" button.
pub fn increment_line(cart: &CartState, line_id: LineId) -> Result<CartResponse, ApiError> {
    debug!(%line_id, "increment_line command");

    cart.with_cart_mut(|c| {
        c.increment(line_id)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Stepper "−" button. At quantity 1 the line is removed.
pub fn decrement_line(cart: &CartState, line_id: LineId) -> Result<CartResponse, ApiError> {
    debug!(%line_id, "decrement_line command");

    cart.with_cart_mut(|c| {
        if c.decrement(line_id)?.is_none() {
            debug!(%line_id, "Line removed by decrement");
        }
        Ok(CartResponse::from(&*c))
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, line_id: LineId) -> Result<CartResponse, ApiError> {
    debug!(%line_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove(line_id)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Position-based quantity update for list UIs.
pub fn set_cart_quantity_at(
    cart: &CartState,
    position: usize,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(position, quantity, "set_cart_quantity_at command");

    cart.with_cart_mut(|c| {
        c.set_line_quantity(position, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Position-based removal for list UIs.
pub fn remove_from_cart_at(cart: &CartState, position: usize) -> Result<CartResponse, ApiError> {
    debug!(position, "remove_from_cart_at command");

    cart.with_cart_mut(|c| {
        c.remove_line(position)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Clears all lines from the cart.
///
/// ## When Used
/// - Customer empties the cart
/// - After an order is placed
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Switches delivery / pickup / dine-in. Accepts the wire names
/// (`delivery`, `pickup`, `dineIn`).
pub fn set_fulfillment_mode(cart: &CartState, mode: &str) -> Result<CartResponse, ApiError> {
    debug!(mode, "set_fulfillment_mode command");

    let mode: FulfillmentMode = mode.parse()?;

    Ok(cart.with_cart_mut(|c| {
        c.set_fulfillment_mode(mode);
        CartResponse::from(&*c)
    }))
}

/// Sets the manual discount in cents. Zero clears it.
pub fn set_discount(cart: &CartState, discount_cents: i64) -> Result<CartResponse, ApiError> {
    debug!(discount_cents, "set_discount command");

    cart.with_cart_mut(|c| {
        c.set_discount(Money::from_cents(discount_cents))?;
        Ok(CartResponse::from(&*c))
    })
}

#[cfg(test)]
mod tests {
    use storefront_core::{Money, PricingRules};

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::error::ErrorCode;

    fn state() -> CartState {
        CartState::new(PricingRules::new(Money::from_cents(500)))
    }

    #[tokio::test]
    async fn test_add_to_cart_freezes_catalog_price() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();

        let response = add_to_cart(
            &catalog,
            &cart,
            AddToCartRequest {
                quantity: Some(2),
                extras: vec!["bacon".to_string()],
                note: Some("medium".to_string()),
                ..AddToCartRequest::new("burger")
            },
        )
        .await
        .unwrap();

        assert_eq!(response.lines.len(), 1);
        let line = &response.lines[0];
        assert_eq!(line.product.unit_price.cents(), 1250);
        assert_eq!(line.selected_extras, vec!["bacon"]);
        assert_eq!(line.note.as_deref(), Some("medium"));
        assert_eq!(response.pricing.subtotal.cents(), 2500);
        assert_eq!(response.pricing.total.cents(), 3000);
    }

    #[tokio::test]
    async fn test_add_to_cart_unknown_product_leaves_cart_empty() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();

        let err = add_to_cart(&catalog, &cart, AddToCartRequest::new("sushi"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&cart).lines.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_zero_quantity() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();

        let err = add_to_cart(
            &catalog,
            &cart,
            AddToCartRequest {
                quantity: Some(0),
                ..AddToCartRequest::new("burger")
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert!(get_cart(&cart).lines.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_with_overflowing_quantity_is_a_cart_error() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();
        add_to_cart(&catalog, &cart, AddToCartRequest::new("fries"))
            .await
            .unwrap();
        let before = get_cart(&cart);

        let err = add_to_cart(
            &catalog,
            &cart,
            AddToCartRequest {
                quantity: Some(i64::MAX / 2),
                ..AddToCartRequest::new("burger")
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart amounts would exceed the supported range");
        assert_eq!(get_cart(&cart), before);
    }

    #[tokio::test]
    async fn test_line_commands_by_id() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();

        add_to_cart(&catalog, &cart, AddToCartRequest::new("fries"))
            .await
            .unwrap();
        let response = add_to_cart(&catalog, &cart, AddToCartRequest::new("cola"))
            .await
            .unwrap();
        let fries = response.lines[0].id;
        let cola = response.lines[1].id;

        let response = update_cart_line(&cart, cola, 3).unwrap();
        assert_eq!(response.pricing.item_count, 4);

        let response = increment_line(&cart, fries).unwrap();
        assert_eq!(response.lines[0].quantity, 2);

        decrement_line(&cart, fries).unwrap();
        let response = decrement_line(&cart, fries).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].id, cola);

        let response = remove_from_cart(&cart, cola).unwrap();
        assert!(response.lines.is_empty());

        let err = remove_from_cart(&cart, cola).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_position_commands() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();
        add_to_cart(&catalog, &cart, AddToCartRequest::new("salad"))
            .await
            .unwrap();

        let before = get_cart(&cart);
        let err = set_cart_quantity_at(&cart, 0, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&cart), before);

        let err = remove_from_cart_at(&cart, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&cart), before);

        let response = set_cart_quantity_at(&cart, 0, 2).unwrap();
        assert_eq!(response.pricing.subtotal.cents(), 1000);

        let response = remove_from_cart_at(&cart, 0).unwrap();
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_mode_and_discount() {
        let cart = state();

        let response = set_fulfillment_mode(&cart, "pickup").unwrap();
        assert_eq!(response.fulfillment_mode, FulfillmentMode::Pickup);
        assert!(response.pricing.delivery_fee.is_zero());

        let err = set_fulfillment_mode(&cart, "teleport").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let response = set_discount(&cart, 250).unwrap();
        assert_eq!(response.pricing.total.cents(), -250);

        let err = set_discount(&cart, -1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&cart).pricing.discount.cents(), 250);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let catalog = InMemoryCatalog::demo();
        let cart = state();
        add_to_cart(&catalog, &cart, AddToCartRequest::new("pizza"))
            .await
            .unwrap();

        let response = clear_cart(&cart);
        assert!(response.lines.is_empty());
        assert_eq!(response.pricing.item_count, 0);
    }
}
