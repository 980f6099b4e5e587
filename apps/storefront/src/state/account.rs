//! # Account State
//!
//! The shopper's favorites as last seen from the API. Used to refuse a
//! duplicate favorite without a round trip. Dropped on logout.

use std::sync::Mutex;

use yetta_core::Favorite;

/// Cached favorites.
#[derive(Debug, Default)]
pub struct AccountState {
    favorites: Mutex<Vec<Favorite>>,
}

impl AccountState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.favorites.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_favorites(&self, favorites: Vec<Favorite>) {
        *self.favorites.lock().unwrap_or_else(|e| e.into_inner()) = favorites;
    }

    pub fn has_favorite(&self, item_id: &str) -> bool {
        self.favorites
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|f| f.item_id == item_id)
    }

    /// Records a favorite the server just accepted.
    pub fn push_favorite(&self, favorite: Favorite) {
        let mut favorites = self.favorites.lock().unwrap_or_else(|e| e.into_inner());
        if !favorites.iter().any(|f| f.item_id == favorite.item_id) {
            favorites.push(favorite);
        }
    }

    /// Forgets a favorite the server just removed.
    pub fn drop_favorite(&self, item_id: &str) {
        self.favorites
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|f| f.item_id != item_id);
    }

    pub fn clear(&self) {
        self.set_favorites(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(id: &str) -> Favorite {
        Favorite {
            item_id: id.to_string(),
            item_title: "Party Platter".to_string(),
            item_image: "/Frontend/images/party_platter.jpg".to_string(),
            item_price: 45.0,
        }
    }

    #[test]
    fn test_favorite_cache() {
        let account = AccountState::new();
        account.push_favorite(favorite("party-platter"));
        account.push_favorite(favorite("party-platter"));
        account.push_favorite(favorite("seasonal-pie"));
        assert_eq!(account.favorites().len(), 2);
        assert!(account.has_favorite("party-platter"));

        account.drop_favorite("party-platter");
        assert!(!account.has_favorite("party-platter"));
        assert_eq!(account.favorites()[0].item_id, "seasonal-pie");

        account.clear();
        assert!(account.favorites().is_empty());
    }
}
