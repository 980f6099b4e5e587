//! # Bakery API Client
//!
//! Typed calls to the bakery REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bakery REST API                                  │
//! │                                                                         │
//! │  No auth                                                               │
//! │  ───────                                                               │
//! │  POST /api/auth/login            {email,password}      → {token,user}   │
//! │  POST /api/auth/signup           {name,email,password} → {token,user}   │
//! │  POST /api/auth/google           {credential}          → {token,user}   │
//! │  POST /api/auth/forgot-password  {email}               → {message}      │
//! │  POST /api/auth/reset-password   {token,new_password}  → {message}      │
//! │                                                                         │
//! │  Authorization: Bearer <token>                                         │
//! │  ─────────────────────────────                                         │
//! │  GET    /api/orders                                    → [Order]        │
//! │  GET    /api/favorites                                 → [Favorite]     │
//! │  POST   /api/favorites/add       Favorite              → 409 if present │
//! │  DELETE /api/favorites/{item_id}                       → 404 if absent  │
//! │  POST   /api/cart/checkout       CheckoutRequest       → CheckoutResult │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Bodies
//! Failed calls answer `{"message": "..."}`. That message is surfaced
//! verbatim; when it is missing (or the server is unreachable) each
//! operation has its own fallback sentence.
//!
//! No client-side timeout is set: a call waits until the server answers or
//! the connection fails.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};
use yetta_core::{AuthResponse, CheckoutRequest, CheckoutResult, Favorite, Order};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Fallback Messages
// =============================================================================

const LOGIN_FAILED: &str = "Login failed. Server is unreachable or responded incorrectly.";
const SIGNUP_FAILED: &str = "Signup failed. Server is unreachable or responded incorrectly.";
const GOOGLE_FAILED: &str = "Google authentication failed. Server error.";
const FORGOT_FAILED: &str = "Request failed. Server error.";
const RESET_FAILED: &str = "Reset failed. Server error.";
const ORDERS_FAILED: &str = "Failed to fetch orders.";
const FAVORITES_FAILED: &str = "Failed to fetch favorites.";
const ADD_FAVORITE_FAILED: &str = "Failed to add favorite.";
const REMOVE_FAVORITE_FAILED: &str = "Failed to remove favorite.";
const CHECKOUT_FAILED: &str = "Checkout failed.";

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleBody<'a> {
    credential: &'a str,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPasswordBody<'a> {
    token: &'a str,
    new_password: &'a str,
}

/// `{"message": "..."}`, used by both success acks and error bodies.
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// Checkout Gateway
// =============================================================================

/// The one call the checkout flow needs.
///
/// [`ApiClient`] is the real implementation; tests substitute their own.
pub trait CheckoutGateway: Send + Sync {
    /// Submits a checkout with the shopper's bearer token.
    ///
    /// A non-2xx answer is an `Err` whose `Display` is the message to show.
    fn submit_checkout(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> impl Future<Output = ClientResult<CheckoutResult>> + Send;
}

// =============================================================================
// API Client
// =============================================================================

/// Client for the bakery REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            http: Client::new(),
            base_url,
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Email/password login.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        info!(email = %email, "Logging in");
        let req = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginBody { email, password });
        self.send_json(req, LOGIN_FAILED).await
    }

    /// Creates an account and logs in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ClientResult<AuthResponse> {
        info!(email = %email, "Signing up");
        let req = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(&SignupBody {
                name,
                email,
                password,
            });
        self.send_json(req, SIGNUP_FAILED).await
    }

    /// Exchanges a Google ID-token credential for a bakery session.
    pub async fn google_login(&self, credential: &str) -> ClientResult<AuthResponse> {
        info!("Verifying Google credential");
        let req = self
            .http
            .post(self.url("/api/auth/google"))
            .json(&GoogleBody { credential });
        self.send_json(req, GOOGLE_FAILED).await
    }

    /// Requests a password reset email. Returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> ClientResult<String> {
        let req = self
            .http
            .post(self.url("/api/auth/forgot-password"))
            .json(&ForgotPasswordBody { email });
        let body: MessageBody = self.send_json(req, FORGOT_FAILED).await?;
        Ok(body
            .message
            .unwrap_or_else(|| "If an account exists with this email, a reset link has been sent.".to_string()))
    }

    /// Sets a new password using the emailed reset token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ClientResult<String> {
        let req = self
            .http
            .post(self.url("/api/auth/reset-password"))
            .json(&ResetPasswordBody {
                token,
                new_password,
            });
        let body: MessageBody = self.send_json(req, RESET_FAILED).await?;
        Ok(body
            .message
            .unwrap_or_else(|| "Password reset successful. You can now login.".to_string()))
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// The shopper's order history, newest first.
    pub async fn fetch_orders(&self, token: &str) -> ClientResult<Vec<Order>> {
        let req = self.http.get(self.url("/api/orders")).bearer_auth(token);
        let mut orders: Vec<Order> = self.send_json(req, ORDERS_FAILED).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub async fn fetch_favorites(&self, token: &str) -> ClientResult<Vec<Favorite>> {
        let req = self.http.get(self.url("/api/favorites")).bearer_auth(token);
        let favorites: Vec<Favorite> = self.send_json(req, FAVORITES_FAILED).await?;
        debug!(count = favorites.len(), "Fetched favorites");
        Ok(favorites)
    }

    /// Adds a favorite. A 409 becomes [`ClientError::AlreadyFavorite`].
    pub async fn add_favorite(&self, token: &str, favorite: &Favorite) -> ClientResult<()> {
        let req = self
            .http
            .post(self.url("/api/favorites/add"))
            .bearer_auth(token)
            .json(favorite);
        let response = send(req, ADD_FAVORITE_FAILED).await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(ClientError::AlreadyFavorite);
        }
        ensure_success(response, ADD_FAVORITE_FAILED).await?;

        info!(item_id = %favorite.item_id, "Added favorite");
        Ok(())
    }

    /// Removes a favorite. A 404 becomes [`ClientError::FavoriteNotFound`].
    pub async fn remove_favorite(&self, token: &str, item_id: &str) -> ClientResult<()> {
        let mut url = url::Url::parse(&self.url("/api/favorites/"))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(item_id);

        let req = self.http.delete(url).bearer_auth(token);
        let response = send(req, REMOVE_FAVORITE_FAILED).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::FavoriteNotFound);
        }
        ensure_success(response, REMOVE_FAVORITE_FAILED).await?;

        info!(item_id = %item_id, "Removed favorite");
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submits the cart for payment.
    pub async fn checkout(&self, token: &str, request: &CheckoutRequest) -> ClientResult<CheckoutResult> {
        info!(
            method = %request.payment_method,
            items = request.items.len(),
            total = request.total,
            "Submitting checkout"
        );
        let req = self
            .http
            .post(self.url("/api/cart/checkout"))
            .bearer_auth(token)
            .json(request);
        self.send_json(req, CHECKOUT_FAILED).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder, fallback: &str) -> ClientResult<T> {
        let response = send(req, fallback).await?;
        let response = ensure_success(response, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::transport(fallback, e))
    }
}

impl CheckoutGateway for ApiClient {
    fn submit_checkout(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> impl Future<Output = ClientResult<CheckoutResult>> + Send {
        self.checkout(token, request)
    }
}

async fn send(req: RequestBuilder, fallback: &str) -> ClientResult<Response> {
    req.send().await.map_err(|e| {
        warn!(error = %e, "Request to bakery API failed");
        ClientError::transport(fallback, e)
    })
}

/// Passes 2xx responses through; turns anything else into `Api` with the
/// server's message or the fallback.
async fn ensure_success(response: Response, fallback: &str) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    warn!(status = status.as_u16(), message = %message, "Bakery API rejected request");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/orders"), "http://localhost:8080/api/orders");
    }

    #[test]
    fn test_from_config() {
        let client = ApiClient::from_config(&ClientConfig::default());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
