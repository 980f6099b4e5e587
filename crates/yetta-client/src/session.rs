//! # Auth Session
//!
//! The logged-in shopper's token and profile, and where they are kept
//! between runs.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  login / signup / google                                               │
//! │        │  AuthResponse { token, user }                                 │
//! │        ▼                                                                │
//! │  AuthSession::from_response ── decode `exp` (signature NOT checked)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  SessionStore::save ──► session.json                                   │
//! │                                                                         │
//! │  [Next start]                                                          │
//! │  SessionStore::load ──► token expired or undecodable?                  │
//! │        ├── yes ──► file removed (forced logout), None                  │
//! │        └── no  ──► Some(session)                                       │
//! │                                                                         │
//! │  logout ──► SessionStore::clear ──► file removed                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Token signatures are verified by the auth API on every call. The client
//! only reads `exp` to avoid sending a token it already knows is dead.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use yetta_core::{AuthResponse, PublicUser};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Token Claims
// =============================================================================

/// Claims the auth API puts in its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The shopper's email.
    pub sub: String,

    /// Expiry as a unix timestamp (seconds).
    pub exp: i64,

    #[serde(default)]
    pub name: Option<String>,
}

/// Reads the claims of a token without checking its signature.
pub fn decode_claims(token: &str) -> ClientResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

// =============================================================================
// Auth Session
// =============================================================================

/// A logged-in shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
    user: PublicUser,
    claims: TokenClaims,
}

impl AuthSession {
    /// Creates a session from a successful auth call.
    ///
    /// Fails with [`ClientError::InvalidToken`] when the token has no
    /// readable `exp` claim.
    pub fn from_response(response: AuthResponse) -> ClientResult<Self> {
        let claims = decode_claims(&response.token)?;
        Ok(AuthSession {
            token: response.token,
            user: response.user,
            claims,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &PublicUser {
        &self.user
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// When the token stops being accepted.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.claims.exp, 0).single()
    }

    /// Whether the token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.claims.exp <= now.timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Token to send, or `TokenExpired` when it is already dead.
    pub fn bearer(&self) -> ClientResult<&str> {
        if self.is_expired() {
            return Err(ClientError::TokenExpired);
        }
        Ok(&self.token)
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// On-disk layout of the saved session.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    yetta_auth_token: String,
    yetta_user: Option<PublicUser>,
}

/// Keeps the session in a JSON file. With no path every call is a no-op.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        SessionStore { path }
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        SessionStore { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Restores the saved session if its token is still valid.
    ///
    /// An expired token, an undecodable token, or a file without a user is
    /// a forced logout: the file is removed and `None` is returned.
    pub fn load(&self) -> ClientResult<Option<AuthSession>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };

        if !path.exists() {
            debug!(?path, "No saved session");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::SessionLoadFailed(e.to_string()))?;

        let stored: StoredSession = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(?path, error = %e, "Saved session is unreadable, logging out");
                self.clear()?;
                return Ok(None);
            }
        };

        let Some(user) = stored.yetta_user else {
            warn!(?path, "Saved session has no user, logging out");
            self.clear()?;
            return Ok(None);
        };

        let response = AuthResponse {
            token: stored.yetta_auth_token,
            user,
        };

        match AuthSession::from_response(response) {
            Ok(session) if !session.is_expired() => {
                info!(email = %session.user().email, "Restored saved session");
                Ok(Some(session))
            }
            Ok(_) => {
                info!(?path, "Saved session expired, logging out");
                self.clear()?;
                Ok(None)
            }
            Err(e) => {
                warn!(?path, error = %e, "Saved token is invalid, logging out");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Writes the session to disk.
    pub fn save(&self, session: &AuthSession) -> ClientResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::SessionSaveFailed(e.to_string()))?;
        }

        let stored = StoredSession {
            yetta_auth_token: session.token.clone(),
            yetta_user: Some(session.user.clone()),
        };
        let contents = serde_json::to_string_pretty(&stored)
            .map_err(|e| ClientError::SessionSaveFailed(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| ClientError::SessionSaveFailed(e.to_string()))?;

        debug!(?path, "Session saved");
        Ok(())
    }

    /// Removes the saved session. Missing file is fine.
    pub fn clear(&self) -> ClientResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(?path, "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::SessionSaveFailed(e.to_string())),
        }
    }
}
