//! # Commands Module
//!
//! Every operation a UI surface can invoke on the storefront.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Categories, product listing, search
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── checkout.rs ◄─── Order placement
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI surface (terminal shell, web front-end, ...)                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub async fn add_to_cart(                                              │
//! │      catalog: &dyn Catalog,   ◄── collaborator                          │
//! │      cart: &CartState,        ◄── session state                         │
//! │      request: AddToCartRequest,                                         │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  UI receives: { lines, pricing, fulfillmentMode }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs the catalog and the cart
//! async fn add_to_cart(catalog: &dyn Catalog, cart: &CartState, ...)
//!
//! // Needs the cart and the submitter
//! async fn checkout(cart: &CartState, submitter: &dyn OrderSubmitter, ...)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
