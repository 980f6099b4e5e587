//! # Account Commands
//!
//! Order history and favorites. All of these need a logged-in shopper.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders ─────────────► GET /api/orders (newest first)                   │
//! │  favorites ──────────► GET /api/favorites, cached                       │
//! │  favorite <id> ──────► menu item or cart line                           │
//! │                        cached already? ──► "Already in favorites!"      │
//! │                        else POST /favorites/add (409 same message)      │
//! │  unfavorite <id> ────► DELETE /api/favorites/<id>                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::{ApiError, FAVORITES_LOGIN_REQUIRED};
use crate::menu;
use crate::state::StorefrontState;
use yetta_client::ClientError;
use yetta_core::{CartLineItem, Favorite, Order};

/// Bearer token, or the favorites-specific login prompt.
fn favorites_token(state: &StorefrontState) -> Result<String, ApiError> {
    state.require_token().map_err(|e| match e {
        ClientError::NotLoggedIn => ApiError::unauthorized(FAVORITES_LOGIN_REQUIRED),
        other => ApiError::from(other),
    })
}

fn favorite_from_line(line: &CartLineItem) -> Favorite {
    Favorite {
        item_id: line.id.clone(),
        item_title: line.title.clone(),
        item_image: line.image_src.clone(),
        item_price: line.unit_price().to_major_f64(),
    }
}

/// Fetches the shopper's orders, newest first.
pub async fn fetch_orders(state: &StorefrontState) -> Result<Vec<Order>, ApiError> {
    debug!("fetch_orders command");

    let token = state.require_token()?;
    Ok(state.api.fetch_orders(&token).await?)
}

pub async fn fetch_favorites(state: &StorefrontState) -> Result<Vec<Favorite>, ApiError> {
    debug!("fetch_favorites command");

    let token = favorites_token(state)?;
    let favorites = state.api.fetch_favorites(&token).await?;
    state.account.set_favorites(favorites.clone());
    Ok(favorites)
}

/// Favorites a specials item, or any line in the cart (custom cakes
/// included).
pub async fn add_favorite(state: &StorefrontState, item_id: &str) -> Result<Favorite, ApiError> {
    debug!(item_id = %item_id, "add_favorite command");

    let token = favorites_token(state)?;
    if state.account.has_favorite(item_id) {
        return Err(ClientError::AlreadyFavorite.into());
    }

    let favorite = menu::find(item_id)
        .map(|item| Favorite::from_purchasable(&item))
        .or_else(|| state.cart.line(item_id).map(|line| favorite_from_line(&line)))
        .ok_or_else(|| ApiError::not_found("Item", item_id))?;

    state.api.add_favorite(&token, &favorite).await?;
    state.account.push_favorite(favorite.clone());
    Ok(favorite)
}

pub async fn remove_favorite(state: &StorefrontState, item_id: &str) -> Result<(), ApiError> {
    debug!(item_id = %item_id, "remove_favorite command");

    let token = favorites_token(state)?;
    state.api.remove_favorite(&token, item_id).await?;
    state.account.drop_favorite(item_id);
    Ok(())
}
