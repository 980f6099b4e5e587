//! # Auth Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Auth Commands                                    │
//! │                                                                         │
//! │  login / signup / google                                               │
//! │     │ local validation (never reaches the network when it fails)       │
//! │     ▼                                                                   │
//! │  ApiClient ──► { token, user } ──► AuthState::establish (saved)         │
//! │                                                                         │
//! │  forgot-password / reset-password ──► server message passed through    │
//! │                                                                         │
//! │  logout ──► StorefrontState::logout (cart kept)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::StorefrontState;
use yetta_core::validation::{
    validate_email, validate_name, validate_new_password, validate_password_reset,
    validate_required,
};
use yetta_core::{AuthResponse, PublicUser};

/// A freshly started session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: PublicUser,
    pub message: String,
}

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub user: Option<PublicUser>,
    pub expires_at: Option<DateTime<Utc>>,
    pub api_url: String,
}

fn start_session(state: &StorefrontState, response: AuthResponse) -> Result<SessionResponse, ApiError> {
    let user = state.auth.establish(response)?;
    state.account.clear();
    Ok(SessionResponse {
        message: format!("Login successful! Welcome, {}.", user.name),
        user,
    })
}

/// Email/password login.
pub async fn login(state: &StorefrontState, email: &str, password: &str) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "login command");

    let email = validate_required("email", email)?;
    validate_required("password", password)?;

    let response = state.api.login(&email, password).await?;
    start_session(state, response)
}

/// Creates an account and logs in.
pub async fn signup(
    state: &StorefrontState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "signup command");

    let name = validate_name(name)?;
    let email = validate_email(email)?;
    validate_new_password(password)?;

    let response = state.api.signup(&name, &email, password).await?;
    start_session(state, response)
}

/// Logs in with a Google ID-token credential.
pub async fn google_login(state: &StorefrontState, credential: &str) -> Result<SessionResponse, ApiError> {
    debug!("google_login command");

    let credential = validate_required("credential", credential)?;
    let response = state.api.google_login(&credential).await?;
    start_session(state, response)
}

/// Asks for a password reset email.
pub async fn forgot_password(state: &StorefrontState, email: &str) -> Result<String, ApiError> {
    debug!(email = %email, "forgot_password command");

    let email = validate_email(email)?;
    Ok(state.api.forgot_password(&email).await?)
}

/// Sets a new password with the emailed reset token.
pub async fn reset_password(
    state: &StorefrontState,
    token: &str,
    password: &str,
    confirmation: &str,
) -> Result<String, ApiError> {
    debug!("reset_password command");

    let token = validate_required("reset token", token)?;
    validate_password_reset(password, confirmation)?;
    Ok(state.api.reset_password(&token, password).await?)
}

pub fn logout(state: &StorefrontState) -> String {
    debug!("logout command");
    state.logout();
    "You have been logged out.".to_string()
}

pub fn whoami(state: &StorefrontState) -> WhoAmIResponse {
    let session = state.auth.session().filter(|s| !s.is_expired());
    WhoAmIResponse {
        user: session.as_ref().map(|s| s.user().clone()),
        expires_at: session.as_ref().and_then(|s| s.expires_at()),
        api_url: state.config.api_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::tests::{auth_response, offline_state};

    #[tokio::test]
    async fn test_signup_validation_happens_before_network() {
        let state = offline_state();

        let err = signup(&state, "Amina", "amina@example.com", "12345").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Password must be at least 6 characters.");

        let err = signup(&state, "Amina", "not-an-email", "s3cret!").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = signup(&state, "  ", "amina@example.com", "s3cret!").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_reset_password_mismatch() {
        let state = offline_state();
        let err = reset_password(&state, "reset-123", "n3wpass", "n3wpas").await.unwrap_err();
        assert_eq!(err.message, "Passwords don't match.");
    }

    #[tokio::test]
    async fn test_login_against_unreachable_server() {
        let state = offline_state();
        let err = login(&state, "amina@example.com", "s3cret!").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(
            err.message,
            "Login failed. Server is unreachable or responded incorrectly."
        );
        assert!(!state.auth.is_logged_in());
    }

    #[test]
    fn test_start_session_and_logout() {
        let state = offline_state();
        let session = start_session(&state, auth_response(3600)).unwrap();
        assert_eq!(session.message, "Login successful! Welcome, Amina.");

        let me = whoami(&state);
        assert_eq!(me.user.unwrap().email, "amina@example.com");
        assert!(me.expires_at.is_some());

        logout(&state);
        assert!(whoami(&state).user.is_none());
    }
}
