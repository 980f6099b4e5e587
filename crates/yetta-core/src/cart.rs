//! # Cart
//!
//! The shopper's cart: one line per item id, quantities that grow on repeat
//! adds, and a total derived on every read.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add_item(croissant) ──► [croissant ×1]                                │
//! │  add_item(croissant) ──► [croissant ×2]          (same id: qty += 1)   │
//! │  add_item(cake-9f2…) ──► [croissant ×2, cake ×1] (new id: append)      │
//! │  remove_item("x")    ──► unchanged                (absent id: no-op)    │
//! │  remove_item(cake)   ──► [croissant ×2]                                │
//! │  clear()             ──► []                                            │
//! │                                                                         │
//! │  item_count() = Σ quantity      total() = Σ price × quantity           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! The first add of an id captures its title and price. Later adds of the
//! same id only bump the quantity, even if they carry a different price.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CustomCakeSpec, OrderItem, Purchasable};

// =============================================================================
// Cart Line Item
// =============================================================================

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    /// Identity key; at most one line per id.
    pub id: String,

    /// Title at time of first add (frozen).
    pub title: String,

    /// Unit price at time of first add (frozen). Missing counts as zero.
    pub price: Option<Money>,

    /// Always at least 1.
    pub quantity: u32,

    pub image_src: String,

    pub description: Option<String>,

    pub is_custom: bool,

    pub details: Option<CustomCakeSpec>,
}

impl CartLineItem {
    /// Creates a fresh line with quantity 1.
    pub fn from_purchasable(item: Purchasable) -> Self {
        CartLineItem {
            id: item.id,
            title: item.title,
            price: item.price,
            quantity: 1,
            image_src: item.image_src,
            description: item.description,
            is_custom: item.is_custom,
            details: item.details,
        }
    }

    /// Unit price with a missing price treated as zero.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.price.unwrap_or_default()
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }

    /// Wire form of this line for checkout.
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            item_id: self.id.clone(),
            title: self.title.clone(),
            quantity: self.quantity,
            price: self.unit_price().to_major_f64(),
            image_src: self.image_src.clone(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same id increases quantity)
/// - Every line has quantity ≥ 1
/// - Lines stay in insertion order
/// - No size limits: adding never fails
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of an item.
    ///
    /// Returns the line after the add so callers can report the new quantity.
    ///
    /// ```rust
    /// use yetta_core::{Cart, Money, Purchasable};
    ///
    /// let mut cart = Cart::new();
    /// let bun = Purchasable::menu_item("b1", "Cinnamon Bun", Some(Money::from_cents(350)), "/b1.jpg");
    ///
    /// cart.add_item(bun.clone());
    /// let line = cart.add_item(bun);
    /// assert_eq!(line.quantity, 2);
    /// assert_eq!(cart.total().cents(), 700);
    /// ```
    pub fn add_item(&mut self, item: Purchasable) -> &CartLineItem {
        if let Some(idx) = self.lines.iter().position(|l| l.id == item.id) {
            self.lines[idx].quantity += 1;
            return &self.lines[idx];
        }

        self.lines.push(CartLineItem::from_purchasable(item));
        let last = self.lines.len() - 1;
        &self.lines[last]
    }

    /// Removes the line with the given id.
    ///
    /// Returns the removed line, or `None` when the id was not in the cart.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLineItem> {
        let idx = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(idx))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ quantity over all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ price × quantity; lines without a price contribute nothing.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Looks up a line by id.
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Wire form of every line, in cart order.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lines.iter().map(CartLineItem::to_order_item).collect()
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Cart totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSummary {
    pub line_count: usize,
    pub item_count: u32,
    pub total: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
