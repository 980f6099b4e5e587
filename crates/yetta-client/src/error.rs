//! # Client Error Types
//!
//! Error types for bakery API calls, configuration, and the saved session.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API Rejection       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Api (status, message)  │ │
//! │  │  InvalidUrl     │  │  (server down,  │  │  AlreadyFavorite (409)  │ │
//! │  │  ConfigLoad     │  │   bad response) │  │  FavoriteNotFound (404) │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Session      │  │     Auth        │                              │
//! │  │                 │  │                 │                              │
//! │  │  SessionLoad    │  │  NotLoggedIn    │                              │
//! │  │  SessionSave    │  │  InvalidToken   │                              │
//! │  │                 │  │  TokenExpired   │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of `Transport` and `Api` is already the sentence to
//! show the shopper: either the server's own message or the fallback for
//! the operation that failed.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the bakery API.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a usable answer (server unreachable, body not
    /// JSON). `message` is the operation's fallback text.
    #[error("{message}")]
    Transport { message: String, detail: String },

    // =========================================================================
    // API Rejections
    // =========================================================================
    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// `POST /api/favorites/add` answered 409.
    #[error("Already in favorites!")]
    AlreadyFavorite,

    /// `DELETE /api/favorites/{item_id}` answered 404.
    #[error("Favorite not found")]
    FavoriteNotFound,

    // =========================================================================
    // Auth Errors
    // =========================================================================
    /// An authenticated call was attempted without a session.
    #[error("Please log in first.")]
    NotLoggedIn,

    /// The token could not be decoded.
    #[error("Invalid auth token: {0}")]
    InvalidToken(String),

    /// The token's `exp` is in the past.
    #[error("Your session has expired. Please log in again.")]
    TokenExpired,

    // =========================================================================
    // Session File Errors
    // =========================================================================
    /// Failed to read the saved session.
    #[error("Failed to load session: {0}")]
    SessionLoadFailed(String),

    /// Failed to write or remove the saved session.
    #[error("Failed to save session: {0}")]
    SessionSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ClientError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ClientError::InvalidToken(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Builds a transport error carrying the operation's fallback text.
    pub fn transport(fallback: &str, detail: impl ToString) -> Self {
        ClientError::Transport {
            message: fallback.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Returns true if trying the same call again might succeed.
    ///
    /// ## Retryable Errors
    /// - Transport failures (server unreachable)
    /// - 5xx answers
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - 4xx rejections (bad credentials, duplicate favorite, ...)
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport { .. } => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the shopper has to log in (again) to continue.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::NotLoggedIn
                | ClientError::TokenExpired
                | ClientError::InvalidToken(_)
                | ClientError::Api { status: 401, .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
        )
    }

    /// The sentence to show the shopper.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::transport("Checkout failed.", "connection refused").is_retryable());
        assert!(ClientError::Api {
            status: 500,
            message: "Failed to save order".into()
        }
        .is_retryable());

        assert!(!ClientError::Api {
            status: 400,
            message: "Bank account required".into()
        }
        .is_retryable());
        assert!(!ClientError::AlreadyFavorite.is_retryable());
        assert!(!ClientError::InvalidUrl("nope".into()).is_retryable());
    }

    #[test]
    fn test_transport_shows_fallback_only() {
        let err = ClientError::transport(
            "Login failed. Server is unreachable or responded incorrectly.",
            "error sending request for url (http://localhost:8080/api/auth/login)",
        );
        assert_eq!(
            err.user_message(),
            "Login failed. Server is unreachable or responded incorrectly."
        );
    }

    #[test]
    fn test_requires_login() {
        assert!(ClientError::TokenExpired.requires_login());
        assert!(ClientError::Api {
            status: 401,
            message: "Invalid token".into()
        }
        .requires_login());
        assert!(!ClientError::FavoriteNotFound.requires_login());
    }
}
