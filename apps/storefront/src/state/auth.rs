//! # Auth State
//!
//! The logged-in shopper, if any, and the file the session is kept in.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Auth State                                       │
//! │                                                                         │
//! │  startup ──► SessionStore::load ──► Some(session) / None                │
//! │                                                                         │
//! │  login / signup / google ──► establish() ──► save + set                 │
//! │                                                                         │
//! │  authenticated command ──► require_token()                              │
//! │        ├── no session ──────► NotLoggedIn                               │
//! │        ├── token expired ───► TokenExpired (caller logs out)            │
//! │        └── ok ──────────────► bearer token                              │
//! │                                                                         │
//! │  logout ──► clear() ──► file removed, session dropped                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use tracing::{info, warn};
use yetta_client::{AuthSession, ClientError, ClientResult, SessionStore};
use yetta_core::{AuthResponse, PublicUser};

/// Session-wide auth state.
#[derive(Debug, Default)]
pub struct AuthState {
    session: Mutex<Option<AuthSession>>,
    store: SessionStore,
}

impl AuthState {
    /// Restores the saved session from `store`.
    ///
    /// An unreadable session file is logged and treated as logged out.
    pub fn restore(store: SessionStore) -> Self {
        let session = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not restore saved session");
            None
        });

        AuthState {
            session: Mutex::new(session),
            store,
        }
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut Option<AuthSession>) -> R) -> R {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut session)
    }

    /// True when a user is present and the token has not expired.
    pub fn is_logged_in(&self) -> bool {
        self.with_session(|s| s.as_ref().is_some_and(|s| !s.is_expired()))
    }

    pub fn user(&self) -> Option<PublicUser> {
        self.with_session(|s| s.as_ref().map(|s| s.user().clone()))
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<AuthSession> {
        self.with_session(|s| s.clone())
    }

    /// Bearer token for an authenticated call.
    ///
    /// `TokenExpired` leaves the session in place; the forced logout is
    /// [`StorefrontState::require_token`](super::StorefrontState::require_token).
    pub fn require_token(&self) -> ClientResult<String> {
        self.with_session(|s| match s.as_ref() {
            None => Err(ClientError::NotLoggedIn),
            Some(session) => session.bearer().map(str::to_string),
        })
    }

    /// Starts a session from a successful auth call and saves it.
    ///
    /// A token without a readable `exp` is refused. Failing to write the
    /// session file only costs persistence, so it is logged, not returned.
    pub fn establish(&self, response: AuthResponse) -> ClientResult<PublicUser> {
        let session = AuthSession::from_response(response)?;
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "Could not save session");
        }

        let user = session.user().clone();
        info!(email = %user.email, "Logged in");
        self.with_session(|s| *s = Some(session));
        Ok(user)
    }

    /// Drops the session and removes the saved file.
    pub fn clear(&self) {
        self.with_session(|s| *s = None);
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Could not remove saved session");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use yetta_client::TokenClaims;

    /// Signed token for `amina@example.com` expiring `secs` from now.
    pub(crate) fn token_expiring_in(secs: i64) -> String {
        let claims = TokenClaims {
            sub: "amina@example.com".to_string(),
            exp: chrono::Utc::now().timestamp() + secs,
            name: Some("Amina".to_string()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
    }

    pub(crate) fn auth_response(secs: i64) -> AuthResponse {
        AuthResponse {
            token: token_expiring_in(secs),
            user: PublicUser {
                id: "65f0c0ffee".to_string(),
                name: "Amina".to_string(),
                email: "amina@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_logged_out_by_default() {
        let auth = AuthState::restore(SessionStore::in_memory());
        assert!(!auth.is_logged_in());
        assert!(auth.user().is_none());
        assert!(matches!(auth.require_token(), Err(ClientError::NotLoggedIn)));
    }

    #[test]
    fn test_establish_and_clear() {
        let auth = AuthState::restore(SessionStore::in_memory());
        let user = auth.establish(auth_response(3600)).unwrap();

        assert_eq!(user.name, "Amina");
        assert!(auth.is_logged_in());
        assert!(auth.require_token().is_ok());

        auth.clear();
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_expired_token_is_refused() {
        let auth = AuthState::restore(SessionStore::in_memory());
        auth.establish(auth_response(-60)).unwrap();

        assert!(!auth.is_logged_in());
        assert!(matches!(auth.require_token(), Err(ClientError::TokenExpired)));
    }

    #[test]
    fn test_undecodable_token_is_refused() {
        let auth = AuthState::restore(SessionStore::in_memory());
        let mut response = auth_response(3600);
        response.token = "not-a-jwt".to_string();

        assert!(auth.establish(response).is_err());
        assert!(!auth.is_logged_in());
    }
}
