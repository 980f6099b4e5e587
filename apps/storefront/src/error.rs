//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Shell                         Commands                                 │
//! │  ─────                         ────────                                 │
//! │                                                                         │
//! │  yetta> checkout mpesa                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError::MissingPhoneNumber ─┐   │  │
//! │  │         │                                                   │   │  │
//! │  │         ▼                                                   ▼   │  │
//! │  │  Rule Violation? ───── CoreError::EmptyCart ────────── ApiError ►│  │
//! │  │         │                                                   ▲   │  │
//! │  │         ▼                                                   │   │  │
//! │  │  Server said no? ───── ClientError::Api { message } ────────┘   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ✗ Please enter a valid Mpesa Express phone number.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `message` is always what the shopper reads. Server messages are
//! passed through verbatim.

use serde::Serialize;
use thiserror::Error;
use tracing::error;
use yetta_client::ClientError;
use yetta_core::{CoreError, ValidationError};

/// Message shown when a favorite action is attempted while logged out.
pub const FAVORITES_LOGIN_REQUIRED: &str = "Please log in to add favorites.";

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "UNAUTHORIZED",
///   "message": "Please log in to complete your purchase."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown menu item, option, or favorite
    NotFound,

    /// Input validation failed before any request was sent
    ValidationError,

    /// Login required (or the session has expired)
    Unauthorized,

    /// Checkout or cart rule violation
    BusinessLogic,

    /// Item is already a favorite
    Conflict,

    /// The bakery API rejected the request
    Rejected,

    /// The bakery API could not be reached
    Network,

    /// Configuration or session file problem
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a login-required error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::UnknownOption { .. } => ApiError::new(ErrorCode::NotFound, message),
            CoreError::NotAuthenticated => ApiError::unauthorized(message),
            CoreError::EmptyCart
            | CoreError::CheckoutInProgress
            | CoreError::AwaitingConfirmation { .. }
            | CoreError::NoCheckoutInFlight
            | CoreError::NoPendingPayment => ApiError::new(ErrorCode::BusinessLogic, message),
            CoreError::Validation(_) => ApiError::validation(message),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let message = err.user_message();
        if err.requires_login() {
            return ApiError::unauthorized(message);
        }
        if err.is_config_error() {
            error!("Storefront configuration error: {}", message);
            return ApiError::internal(message);
        }

        match err {
            ClientError::Transport { detail, .. } => {
                error!("Bakery API unreachable: {}", detail);
                ApiError::new(ErrorCode::Network, message)
            }
            ClientError::AlreadyFavorite => ApiError::new(ErrorCode::Conflict, message),
            ClientError::FavoriteNotFound => ApiError::new(ErrorCode::NotFound, message),
            ClientError::Api { .. } => ApiError::new(ErrorCode::Rejected, message),
            _ => {
                error!("Storefront session error: {}", message);
                ApiError::internal(message)
            }
        }
    }
}

/// Shell output failures.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_shopper_message() {
        let err = ApiError::from(CoreError::NotAuthenticated);
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.to_string(), "Please log in to complete your purchase.");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = ApiError::from(CoreError::from(ValidationError::MissingPhoneNumber));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please enter a valid Mpesa Express phone number.");
    }

    #[test]
    fn test_client_errors_map_to_codes() {
        let err = ApiError::from(ClientError::Api {
            status: 400,
            message: "Invalid Mpesa Express phone number format".to_string(),
        });
        assert_eq!(err.code, ErrorCode::Rejected);
        assert_eq!(err.message, "Invalid Mpesa Express phone number format");

        let err = ApiError::from(ClientError::transport("Failed to fetch orders.", "connection refused"));
        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(err.message, "Failed to fetch orders.");

        assert_eq!(ApiError::from(ClientError::AlreadyFavorite).code, ErrorCode::Conflict);
        assert_eq!(ApiError::from(ClientError::TokenExpired).code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::not_found("Menu item", "eclair")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Menu item not found: eclair");
    }
}
