//! # Cart State
//!
//! Holds the shopper's cart for the whole session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` so every command sees the same
//! cart and only one of them changes it at a time. The lock is never held
//! across an `.await`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell Line               Command                 Cart Change           │
//! │  ──────────               ───────                 ───────────           │
//! │                                                                         │
//! │  add seasonal-pie ───────► add_to_cart() ───────► qty += 1 or push     │
//! │                                                                         │
//! │  add-cake ───────────────► add_custom_cake() ───► push (new uuid)      │
//! │                                                                         │
//! │  remove <id> ────────────► remove_from_cart() ──► whole line removed   │
//! │                                                                         │
//! │  clear ──────────────────► clear_cart() ────────► lines.clear()        │
//! │                                                                         │
//! │  checkout (success) ─────► CheckoutState ───────► lines.clear()        │
//! │                                                                         │
//! │  Every change is reported to the CartEventEmitter.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::debug;
use yetta_core::{Cart, CartLineItem, CartSummary, Purchasable};

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Receives cart change notifications (badge counters, logs).
pub trait CartEventEmitter: Send + Sync {
    /// Emits the cart totals after any change.
    fn emit_changed(&self, summary: &CartSummary);

    /// Emits when a line is removed.
    fn emit_removed(&self, line: &CartLineItem);
}

/// Writes cart changes to the log.
pub struct TracingEmitter;

impl CartEventEmitter for TracingEmitter {
    fn emit_changed(&self, summary: &CartSummary) {
        debug!(
            lines = summary.line_count,
            items = summary.item_count,
            total = %summary.total,
            "Cart changed"
        );
    }

    fn emit_removed(&self, line: &CartLineItem) {
        debug!(id = %line.id, quantity = line.quantity, "Cart line removed");
    }
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl CartEventEmitter for NoOpEmitter {
    fn emit_changed(&self, _summary: &CartSummary) {}
    fn emit_removed(&self, _line: &CartLineItem) {}
}

// =============================================================================
// Cart State
// =============================================================================

/// Session-wide cart.
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    emitter: Arc<dyn CartEventEmitter>,
}

impl CartState {
    /// Creates an empty cart that logs its changes.
    pub fn new() -> Self {
        Self::with_emitter(Arc::new(TracingEmitter))
    }

    pub fn with_emitter(emitter: Arc<dyn CartEventEmitter>) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
            emitter,
        }
    }

    /// Executes a closure with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&cart)
    }

    /// Executes a closure with write access to the cart and reports the
    /// resulting totals.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut cart);
        self.emitter.emit_changed(&CartSummary::from(&*cart));
        result
    }

    /// Adds one of `item`. Returns the line as it now stands.
    pub fn add(&self, item: Purchasable) -> CartLineItem {
        self.with_cart_mut(|cart| cart.add_item(item).clone())
    }

    /// Removes the whole line. `None` when the id is not in the cart.
    pub fn remove(&self, id: &str) -> Option<CartLineItem> {
        let removed = self.with_cart_mut(|cart| cart.remove_item(id));
        if let Some(line) = &removed {
            self.emitter.emit_removed(line);
        }
        removed
    }

    pub fn clear(&self) {
        self.with_cart_mut(Cart::clear);
    }

    pub fn summary(&self) -> CartSummary {
        self.with_cart(|cart| CartSummary::from(cart))
    }

    /// Copy of the line with this id.
    pub fn line(&self, id: &str) -> Option<CartLineItem> {
        self.with_cart(|cart| cart.get(id).cloned())
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
