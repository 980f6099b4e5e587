//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                   │            │
//! │                   add_to_cart                         cart cleared     │
//! │                   add_custom_cake                                      │
//! │                   remove_from_cart                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::menu;
use crate::state::StorefrontState;
use yetta_core::{Cart, CartLineItem, CartSummary};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineItem>,
    pub summary: CartSummary,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            summary: CartSummary::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(state: &StorefrontState) -> CartResponse {
    state.cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one of a specials item.
///
/// ## Behavior
/// - Already in cart: quantity increases, first title and price are kept
/// - Not in cart: appended as a new line with quantity 1
pub fn add_to_cart(state: &StorefrontState, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "add_to_cart command");

    let item = menu::find(item_id).ok_or_else(|| ApiError::not_found("Menu item", item_id))?;
    state.cart.add(item);
    Ok(get_cart(state))
}

/// Removes a whole line, whatever its quantity.
pub fn remove_from_cart(state: &StorefrontState, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");

    state
        .cart
        .remove(item_id)
        .ok_or_else(|| ApiError::not_found("Cart item", item_id))?;
    Ok(get_cart(state))
}

/// Clears all items from the cart.
pub fn clear_cart(state: &StorefrontState) -> CartResponse {
    debug!("clear_cart command");
    state.cart.clear();
    get_cart(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::tests::offline_state;

    #[test]
    fn test_add_accumulates_quantity() {
        let state = offline_state();

        add_to_cart(&state, "seasonal-pie").unwrap();
        add_to_cart(&state, "party-platter").unwrap();
        let cart = add_to_cart(&state, "seasonal-pie").unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].id, "seasonal-pie");
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.summary.item_count, 3);
        assert_eq!(state.config.format_currency(cart.summary.total), "Ksh. 95.00");
    }

    #[test]
    fn test_unknown_ids() {
        let state = offline_state();
        assert_eq!(add_to_cart(&state, "eclair").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(remove_from_cart(&state, "eclair").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_and_clear() {
        let state = offline_state();
        add_to_cart(&state, "seasonal-pie").unwrap();
        add_to_cart(&state, "seasonal-pie").unwrap();
        add_to_cart(&state, "party-platter").unwrap();

        let cart = remove_from_cart(&state, "seasonal-pie").unwrap();
        assert_eq!(cart.summary.item_count, 1);

        let cart = clear_cart(&state);
        assert!(cart.lines.is_empty());
    }
}
