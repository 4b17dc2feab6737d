//! # Cart State
//!
//! Owns the session's cart store.
//!
//! ## Thread Safety
//! The store sits behind `Arc<Mutex<T>>` because:
//! 1. Several UI surfaces (menu, cart drawer, checkout) may call in
//! 2. Only one mutation may run at a time so each recompute stays atomic
//! 3. Collaborator calls are async and may hop threads
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                    Lock                 Store call             │
//! │  ───────                    ────                 ──────────             │
//! │  add_to_cart() ───────────► with_cart_mut ─────► add_line()             │
//! │  update_cart_line() ──────► with_cart_mut ─────► update_quantity()      │
//! │  remove_from_cart() ──────► with_cart_mut ─────► remove()               │
//! │  set_fulfillment_mode() ──► with_cart_mut ─────► set_fulfillment_mode() │
//! │  get_cart() ──────────────► with_cart ─────────► snapshot()             │
//! │                                                                         │
//! │  NOTE: The lock is never held across an await.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{CartStore, PricingRules};

/// Session-owned cart.
///
/// Cloning shares the same underlying cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Creates an empty cart for a new session.
    pub fn new(rules: PricingRules) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(CartStore::new(rules))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let pricing = cart_state.with_cart(|cart| cart.snapshot());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_line(product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        f(&mut self.lock())
    }

    // Store mutations validate before writing, so a panic elsewhere cannot
    // leave the cart half-updated and the poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(PricingRules::default())
    }
}
