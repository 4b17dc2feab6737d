//! # Cart Store
//!
//! Holds the in-progress order and keeps its pricing snapshot current.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Mutation                    Effect                    Then             │
//! │  ────────                    ──────                    ────             │
//! │  add_line(NewLine) ────────► lines.push(line) ───────► recompute()      │
//! │  update_quantity(id, n) ───► line.quantity = n ──────► recompute()      │
//! │  set_line_quantity(pos, n) ► line.quantity = n ──────► recompute()      │
//! │  remove(id) / remove_line ─► lines.remove(i) ────────► recompute()      │
//! │  remove_lines(ids) ────────► lines.retain(..) ───────► recompute()      │
//! │  clear() ──────────────────► lines.clear() ──────────► recompute()      │
//! │  set_fulfillment_mode(m) ──► mode = m ───────────────► recompute()      │
//! │  set_discount(d) ──────────► discount = d ───────────► recompute()      │
//! │                                                                         │
//! │  snapshot() ───────────────► (read only, no recompute)                  │
//! │                                                                         │
//! │  Every mutation validates BEFORE writing, and a change whose totals     │
//! │  would overflow is undone. A rejected call leaves lines, settings and   │
//! │  snapshot exactly as they were.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Lines carry a [`LineId`] from a per-store counter. Position-based calls
//! (`set_line_quantity`, `remove_line`) are an adapter for list UIs; a
//! position is only valid until the next removal.
//!
//! ## Example
//! ```rust
//! use storefront_core::{CartStore, FulfillmentMode, Money, NewLine, ProductSnapshot};
//!
//! let mut cart = CartStore::default();
//! let pizza = ProductSnapshot::new("pizza", "Margherita", Money::from_cents(2500));
//!
//! cart.add_line(NewLine::new(pizza).quantity(2)).unwrap();
//! assert_eq!(cart.snapshot().subtotal.cents(), 5000);
//!
//! cart.set_fulfillment_mode(FulfillmentMode::Pickup);
//! assert_eq!(cart.snapshot().total.cents(), 5000);
//! ```

use chrono::Utc;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::pricing::{price_cart, PricingRules};
use crate::types::{FulfillmentMode, LineId, OrderLine, PricingSnapshot, ProductSnapshot};
use crate::validation::{normalize_optional, validate_discount, validate_quantity};

// =============================================================================
// New Line Request
// =============================================================================

/// Everything needed to add a line. Defaults: quantity 1, no extras, no note.
#[derive(Debug, Clone)]
pub struct NewLine {
    product: ProductSnapshot,
    quantity: i64,
    extras: Vec<String>,
    note: Option<String>,
}

impl NewLine {
    pub fn new(product: ProductSnapshot) -> Self {
        NewLine {
            product,
            quantity: 1,
            extras: Vec::new(),
            note: None,
        }
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Appends one extra label.
    pub fn extra(mut self, label: impl Into<String>) -> Self {
        self.extras.push(label.into());
        self
    }

    /// Appends extra labels in order. Duplicates are kept.
    pub fn extras<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Sets the note. A blank note is stored as no note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl From<ProductSnapshot> for NewLine {
    fn from(product: ProductSnapshot) -> Self {
        NewLine::new(product)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart for one session.
///
/// ## Invariants
/// - Every line has `quantity >= 1`
/// - Lines keep insertion order; only removal shifts positions
/// - `snapshot()` always equals `price_cart(lines, mode, discount, rules)`,
///   which never overflows for a committed state
/// - Line ids are never reused, not even after `clear()`
#[derive(Debug, Clone)]
pub struct CartStore {
    lines: Vec<OrderLine>,
    mode: FulfillmentMode,
    discount: Money,
    rules: PricingRules,
    next_id: u64,
    snapshot: PricingSnapshot,
}

impl CartStore {
    /// Creates an empty cart in delivery mode with no discount.
    pub fn new(rules: PricingRules) -> Self {
        let mut cart = CartStore {
            lines: Vec::new(),
            mode: FulfillmentMode::default(),
            discount: Money::zero(),
            rules,
            next_id: 1,
            snapshot: PricingSnapshot::empty(),
        };
        cart.recompute();
        cart
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current pricing. Reading never recomputes.
    #[inline]
    pub fn snapshot(&self) -> PricingSnapshot {
        self.snapshot
    }

    #[inline]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Current position of a line, for list UIs.
    pub fn position_of(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    /// Number of lines (not items; see `snapshot().item_count`).
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn fulfillment_mode(&self) -> FulfillmentMode {
        self.mode
    }

    #[inline]
    pub fn discount(&self) -> Money {
        self.discount
    }

    #[inline]
    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    // -------------------------------------------------------------------------
    // Line mutations
    // -------------------------------------------------------------------------

    /// Appends a new line built from the request.
    ///
    /// Never merges with an existing line for the same product: two adds give
    /// two lines, each with its own extras and note.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if the quantity is below 1
    /// - `AmountTooLarge` if the new line would overflow the cart totals
    pub fn add_line(&mut self, request: impl Into<NewLine>) -> CartResult<LineId> {
        let request = request.into();
        validate_quantity(request.quantity)?;

        let id = LineId::from_raw(self.next_id);
        self.lines.push(OrderLine {
            id,
            product: request.product,
            quantity: request.quantity,
            selected_extras: request.extras,
            note: normalize_optional(request.note),
            added_at: Utc::now(),
        });

        if let Err(err) = self.commit() {
            self.lines.pop();
            return Err(err);
        }
        self.next_id += 1;
        Ok(id)
    }

    /// Replaces the quantity of the line with the given id.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if the quantity is below 1 (use `remove`)
    /// - `LineNotFound` if the id is unknown
    /// - `AmountTooLarge` if the totals would overflow
    pub fn update_quantity(&mut self, id: LineId, quantity: i64) -> CartResult<()> {
        validate_quantity(quantity)?;
        let index = self.index_of(id)?;
        self.replace_quantity(index, quantity)
    }

    /// Replaces the quantity of the line at `position`.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if the quantity is below 1 (use `remove_line`)
    /// - `IndexOutOfRange` if no line is at `position`
    /// - `AmountTooLarge` if the totals would overflow
    pub fn set_line_quantity(&mut self, position: usize, quantity: i64) -> CartResult<()> {
        validate_quantity(quantity)?;
        self.check_position(position)?;
        self.replace_quantity(position, quantity)
    }

    /// Adds one to a line's quantity.
    pub fn increment(&mut self, id: LineId) -> CartResult<i64> {
        let index = self.index_of(id)?;
        let quantity = self.lines[index]
            .quantity
            .checked_add(1)
            .ok_or(CartError::AmountTooLarge)?;

        self.replace_quantity(index, quantity)?;
        Ok(quantity)
    }

    /// Takes one off a line's quantity, removing the line when it would
    /// reach zero.
    ///
    /// ## Returns
    /// The new quantity, or `None` if the line was removed.
    pub fn decrement(&mut self, id: LineId) -> CartResult<Option<i64>> {
        let index = self.index_of(id)?;

        let quantity = self.lines[index].quantity;
        if quantity > 1 {
            self.replace_quantity(index, quantity - 1)?;
            return Ok(Some(quantity - 1));
        }

        self.remove_at(index)?;
        Ok(None)
    }

    /// Removes the line with the given id.
    pub fn remove(&mut self, id: LineId) -> CartResult<OrderLine> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    /// Removes the line at `position`; later lines shift down by one.
    pub fn remove_line(&mut self, position: usize) -> CartResult<OrderLine> {
        self.check_position(position)?;
        self.remove_at(position)
    }

    /// Removes every line whose id is in `ids`, in one step. Ids not in the
    /// cart are skipped, so lines added after the ids were collected stay.
    ///
    /// ## Returns
    /// The number of lines removed.
    pub fn remove_lines(&mut self, ids: &[LineId]) -> CartResult<usize> {
        let kept: Vec<OrderLine> = self
            .lines
            .iter()
            .filter(|line| !ids.contains(&line.id))
            .cloned()
            .collect();
        let removed = self.lines.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        self.snapshot = self.price(&kept, self.discount)?;
        self.lines = kept;
        Ok(removed)
    }

    /// Empties the cart. Mode and discount are order-level settings and are
    /// kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    // -------------------------------------------------------------------------
    // Order-level settings
    // -------------------------------------------------------------------------

    pub fn set_fulfillment_mode(&mut self, mode: FulfillmentMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Sets the manual discount. Zero clears it.
    ///
    /// The discount is not capped at subtotal plus fee, so the total may
    /// become negative.
    ///
    /// ## Errors
    /// - `InvalidDiscount` if the amount is negative
    /// - `AmountTooLarge` if the total would overflow
    pub fn set_discount(&mut self, discount: Money) -> CartResult<()> {
        validate_discount(discount)?;

        self.snapshot = self.price(&self.lines, discount)?;
        self.discount = discount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn index_of(&self, id: LineId) -> CartResult<usize> {
        self.position_of(id).ok_or(CartError::LineNotFound(id))
    }

    fn check_position(&self, position: usize) -> CartResult<()> {
        if position >= self.lines.len() {
            return Err(CartError::IndexOutOfRange {
                position,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn price(&self, lines: &[OrderLine], discount: Money) -> CartResult<PricingSnapshot> {
        price_cart(lines, self.mode, discount, &self.rules).ok_or(CartError::AmountTooLarge)
    }

    /// Prices the current lines and stores the snapshot. On error the
    /// snapshot is untouched and the caller undoes its line change.
    fn commit(&mut self) -> CartResult<()> {
        self.snapshot = self.price(&self.lines, self.discount)?;
        Ok(())
    }

    fn replace_quantity(&mut self, index: usize, quantity: i64) -> CartResult<()> {
        let previous = std::mem::replace(&mut self.lines[index].quantity, quantity);
        if let Err(err) = self.commit() {
            self.lines[index].quantity = previous;
            return Err(err);
        }
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> CartResult<OrderLine> {
        let removed = self.lines.remove(index);
        if let Err(err) = self.commit() {
            self.lines.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }

    /// Replaces the snapshot in one assignment, for changes that cannot fail.
    ///
    /// Every committed state was priced with headroom for any mode and for
    /// an empty cart, so mode switches and `clear()` always price.
    fn recompute(&mut self) {
        if let Some(snapshot) = price_cart(&self.lines, self.mode, self.discount, &self.rules) {
            self.snapshot = snapshot;
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(PricingRules::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
