//! # Error Types
//!
//! Domain-specific error types for yetta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  yetta-core errors (this file)                                         │
//! │  ├── CoreError        - Cake builder and checkout rule violations      │
//! │  └── ValidationError  - Missing or malformed user input                │
//! │                                                                         │
//! │  yetta-client errors (separate crate)                                  │
//! │  └── ClientError      - Transport, API rejection, session file         │
//! │                                                                         │
//! │  Storefront command errors (in app)                                    │
//! │  └── ApiError         - What the shopper sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                        ClientError ─┴──► ApiError → Shopper            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The `Display` text of each variant is the message shown to the shopper,
/// so wording matches what the storefront prints.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cake builder was asked for an option that is not on offer.
    #[error("Unknown {category} option: {option_id}")]
    UnknownOption { category: String, option_id: String },

    /// Checkout was attempted without a logged-in shopper.
    ///
    /// ## User Workflow
    /// ```text
    /// Pay Now (logged out)
    ///      │
    ///      ▼
    /// NotAuthenticated ──► "Please log in to complete your purchase."
    ///      │
    ///      ▼
    /// Shopper logs in, cart still intact, retries
    /// ```
    #[error("Please log in to complete your purchase.")]
    NotAuthenticated,

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// A checkout request is already in flight.
    #[error("Your order is already being processed.")]
    CheckoutInProgress,

    /// An mpesa payment is waiting for the shopper's PIN confirmation.
    #[error("Confirm the Mpesa Express payment sent to {phone_number} first.")]
    AwaitingConfirmation { phone_number: String },

    /// An outcome arrived while no checkout was being submitted.
    #[error("No checkout is being submitted.")]
    NoCheckoutInFlight,

    /// `confirm_payment` was called while no mpesa payment was pending.
    #[error("There is no pending payment to confirm.")]
    NoPendingPayment,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any network traffic happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The Mpesa Express phone number is missing.
    #[error("Please enter a valid Mpesa Express phone number.")]
    MissingPhoneNumber,

    /// Password shorter than the minimum the auth API accepts.
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    /// New password and its confirmation differ.
    #[error("Passwords don't match.")]
    PasswordMismatch,

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
