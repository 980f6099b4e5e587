//! # State Module
//!
//! Everything the storefront remembers during a run.
//!
//! Each concern gets its own state type. Commands take the whole
//! [`StorefrontState`] but only touch the parts they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  StorefrontState::new(config)                                           │
//! │          │                                                              │
//! │   ┌──────┼────────────┬─────────────┬──────────────┬──────────────┐    │
//! │   ▼      ▼            ▼             ▼              ▼              ▼    │
//! │ Cart   Builder      Auth         Checkout       Account        Config  │
//! │ State  State        State        State          State          State   │
//! │                                                                         │
//! │ Arc<   Mutex<       Mutex<       Mutex<         Mutex<Vec<     read    │
//! │ Mutex< CakeBuilder> Option<      Checkout       Favorite>>     only    │
//! │ Cart>>              AuthSession>> Machine>                             │
//! │                                                                         │
//! │ api: ApiClient (bakery REST API, also the CheckoutGateway)              │
//! │                                                                         │
//! │ logout() / expired token: Auth, Checkout and Account are reset.         │
//! │ The cart stays.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod account;
mod auth;
mod builder;
mod cart;
mod checkout;
mod config;

pub use account::AccountState;
pub use auth::AuthState;
pub use builder::BuilderState;
pub use cart::{CartEventEmitter, CartState, NoOpEmitter, TracingEmitter};
pub use checkout::CheckoutState;
pub use config::ConfigState;

use tracing::info;
use yetta_client::{ApiClient, ClientConfig, ClientError, ClientResult, SessionStore};

/// All state for one storefront run.
pub struct StorefrontState {
    pub api: ApiClient,
    pub cart: CartState,
    pub builder: BuilderState,
    pub auth: AuthState,
    pub checkout: CheckoutState,
    pub account: AccountState,
    pub config: ConfigState,
}

impl StorefrontState {
    /// Builds every state object and restores the saved session.
    pub fn new(config: &ClientConfig) -> Self {
        let store = SessionStore::new(config.session_path());
        let auth = AuthState::restore(store);

        info!(
            api = %config.base_url(),
            logged_in = auth.is_logged_in(),
            "Storefront state initialized"
        );

        StorefrontState {
            api: ApiClient::from_config(config),
            cart: CartState::new(),
            builder: BuilderState::new(),
            auth,
            checkout: CheckoutState::new(),
            account: AccountState::new(),
            config: ConfigState::from_client_config(config),
        }
    }

    /// Bearer token for an authenticated command.
    ///
    /// An expired token is a forced logout: the same teardown as `logout`
    /// runs before `TokenExpired` is returned.
    pub fn require_token(&self) -> ClientResult<String> {
        let token = self.auth.require_token();
        if matches!(token, Err(ClientError::TokenExpired)) {
            info!("Session expired, logging out");
            self.logout();
        }
        token
    }

    /// Tears down everything derived from the logged-in shopper.
    ///
    /// The cart and the cake in progress survive.
    pub fn logout(&self) {
        self.auth.clear();
        self.checkout.reset();
        self.account.clear();
        info!("Logged out");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use yetta_core::{CheckoutForm, Favorite, Purchasable};

    pub(crate) use super::auth::tests::auth_response;

    /// State that never touches the disk and whose API is unreachable.
    pub(crate) fn offline_state() -> StorefrontState {
        let mut config = ClientConfig::default();
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.session.persist = false;
        StorefrontState::new(&config)
    }

    #[test]
    fn test_logout_keeps_cart() {
        let state = offline_state();
        state.auth.establish(auth_response(3600)).unwrap();
        state.cart.add(Purchasable::menu_item("party-platter", "Party Platter", None, ""));

        state.logout();

        assert!(!state.auth.is_logged_in());
        assert_eq!(state.cart.summary().item_count, 1);
        assert!(state.account.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_tears_down_account_and_checkout() {
        let state = offline_state();
        state.auth.establish(auth_response(3600)).unwrap();
        state.account.set_favorites(vec![Favorite::from_purchasable(&Purchasable::menu_item(
            "party-platter",
            "Party Platter",
            None,
            "",
        ))]);
        state.cart.add(Purchasable::menu_item("seasonal-pie", "Seasonal Fruit Pie", None, ""));

        // Leaves an error notice on the checkout machine.
        let _ = crate::commands::checkout::checkout(&state, CheckoutForm::mpesa("  ")).await;
        assert!(state.checkout.snapshot().notice().is_some());

        state.auth.establish(auth_response(-60)).unwrap();
        assert!(matches!(state.require_token(), Err(ClientError::TokenExpired)));

        assert!(state.auth.session().is_none());
        assert!(state.account.favorites().is_empty());
        assert!(state.checkout.snapshot().notice().is_none());
        assert_eq!(state.cart.summary().item_count, 1);
        assert!(matches!(state.require_token(), Err(ClientError::NotLoggedIn)));
    }
}
