//! # yetta-core: Pure Business Logic for the Yetta Storefront
//!
//! This crate holds the storefront's cart, cake builder, and checkout rules
//! as pure functions and plain state with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Yetta Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront Shell (apps/storefront)             │   │
//! │  │    add ──► builder ──► checkout ──► confirm ──► orders          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ yetta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │   money   │  │configurator│  │   cart    │  │ checkout  │ │   │
//! │  │   │   Money   │  │CakeBuilder │  │   Cart    │  │  Machine  │ │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  yetta-client (REST layer)                      │   │
//! │  │        bakery API calls, auth session, client config            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and domain types (Purchasable, CheckoutRequest, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart store
//! - [`configurator`] - Custom cake builder and pricing
//! - [`checkout`] - Checkout state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use yetta_core::{CakeBuilder, Cart};
//!
//! let mut builder = CakeBuilder::default();
//! builder.toggle_topping("fresh-fruit").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(builder.commit());
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total().to_string(), "40.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod configurator;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use yetta_core::Money` instead of
// `use yetta_core::money::Money`

pub use cart::{Cart, CartLineItem, CartSummary};
pub use checkout::{CheckoutForm, CheckoutMachine, CheckoutPhase, Notice, NoticeKind};
pub use configurator::{CakeBuilder, OptionCatalog, OptionCategory};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest password the auth API accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;
