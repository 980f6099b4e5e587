//! # Validation Module
//!
//! Input checks that run before anything is sent to the bakery API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (clap)                                                 │
//! │  ├── Argument presence and types                                       │
//! │  └── Immediate usage feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands / checkout machine (Rust)                           │
//! │  └── THIS MODULE: phone, email, password rules                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bakery API                                                   │
//! │  ├── Mpesa phone format (2547XXXXXXXX)                                 │
//! │  └── Duplicate accounts, bad credentials                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use yetta_core::validation::{validate_email, validate_phone_number};
//!
//! assert!(validate_email("amina@example.com").is_ok());
//! assert_eq!(validate_phone_number(" 254712345678 ").unwrap(), "254712345678");
//! ```

use crate::error::ValidationError;
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the Mpesa Express phone number.
///
/// Only presence is checked here; the API enforces the `2547XXXXXXXX`
/// format and reports its own message.
///
/// ## Returns
/// The trimmed number.
pub fn validate_phone_number(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::MissingPhoneNumber);
    }

    Ok(phone.to_string())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - One `@` with text on both sides and a dot in the domain
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(email.to_string())
}

/// Validates a display name for signup.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a new password (signup and reset).
///
/// ## Example
/// ```rust
/// use yetta_core::validation::validate_new_password;
///
/// assert!(validate_new_password("s3cret!").is_ok());
/// assert!(validate_new_password("12345").is_err());
/// ```
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates a reset password and its confirmation.
pub fn validate_password_reset(password: &str, confirmation: &str) -> ValidationResult<()> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }

    validate_new_password(password)
}

/// Validates that a required free-text field (token, credential, id) is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_number() {
        assert_eq!(validate_phone_number("254712345678").unwrap(), "254712345678");
        assert!(matches!(
            validate_phone_number(""),
            Err(ValidationError::MissingPhoneNumber)
        ));
        assert!(validate_phone_number("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("amina@example.com").is_ok());
        assert_eq!(validate_email("  a@b.co ").unwrap(), "a@b.co");

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(" Amina ").unwrap(), "Amina");
        assert!(validate_name("").is_err());
        assert!(validate_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("123456").is_ok());
        assert!(matches!(
            validate_new_password("12345"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        ));
    }

    #[test]
    fn test_validate_password_reset() {
        assert!(validate_password_reset("abcdef", "abcdef").is_ok());
        assert!(matches!(
            validate_password_reset("abcdef", "abcdeg"),
            Err(ValidationError::PasswordMismatch)
        ));
        assert!(validate_password_reset("abc", "abc").is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("token", " t0k ").unwrap(), "t0k");
        assert!(validate_required("token", "").is_err());
    }
}
