//! # Client Configuration
//!
//! Configuration for the storefront's connection to the bakery API.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     YETTA_API_URL=https://api.yetta.example                            │
//! │     YETTA_SESSION_FILE=/tmp/yetta-session.json                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.yetta.storefront/ (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, session persisted in the data dir           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "http://localhost:8080"
//!
//! [session]
//! persist = true
//! path = "/home/amina/.local/share/storefront/session.json"
//!
//! [store]
//! name = "Yetta Bakery"
//! currency_symbol = "Ksh."
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const SESSION_FILE_NAME: &str = "session.json";

// =============================================================================
// API Settings
// =============================================================================

/// Where the bakery API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Where the logged-in session is kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Keep the session on disk. When false the shopper logs in every run.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Explicit session file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            persist: true,
            path: None,
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Shop branding used for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Yetta Bakery".to_string()
}

fn default_currency_symbol() -> String {
    "Ksh.".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    ///
    /// A missing file is only tolerated at the default location.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();
        let explicit = config_path.is_some();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ClientError::ConfigLoadFailed(format!(
                    "{} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.store.currency_symbol.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("YETTA_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup("YETTA_SESSION_FILE") {
            debug!(path = %path, "Overriding session file from environment");
            self.session.path = Some(PathBuf::from(path));
        }

        if let Some(persist) = lookup("YETTA_PERSIST_SESSION") {
            match persist.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.session.persist = true,
                "0" | "false" | "no" => self.session.persist = false,
                _ => warn!(value = %persist, "Unknown YETTA_PERSIST_SESSION value"),
            }
        }

        if let Some(name) = lookup("YETTA_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("YETTA_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "yetta", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the API base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Where the session is stored, or `None` when persistence is off.
    pub fn session_path(&self) -> Option<PathBuf> {
        if !self.session.persist {
            return None;
        }

        self.session.path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "yetta", "storefront")
                .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert!(config.session.persist);
        assert_eq!(config.store.currency_symbol, "Ksh.");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ws://localhost:8080".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.yetta.example/".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://api.yetta.example");

        config.store.currency_symbol = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("YETTA_API_URL", "https://bakery.test"),
            ("YETTA_SESSION_FILE", "/tmp/yetta.json"),
            ("YETTA_STORE_NAME", "Yetta Westlands"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "https://bakery.test");
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/yetta.json")));
        assert_eq!(config.store.name, "Yetta Westlands");
        assert_eq!(config.store.currency_symbol, "Ksh.");
    }

    #[test]
    fn test_persist_off_means_no_session_path() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|key| (key == "YETTA_PERSIST_SESSION").then(|| "false".to_string()));
        assert!(config.session_path().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://bakery.test"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://bakery.test");
        assert!(config.session.persist);
        assert_eq!(config.store.name, "Yetta Bakery");
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let path = std::env::temp_dir().join(format!("yetta-missing-{}.toml", uuid::Uuid::new_v4()));

        let err = ClientConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ClientError::ConfigLoadFailed(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let path = std::env::temp_dir().join(format!("yetta-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[store]\nname = \"Yetta Karen\"\n").unwrap();

        let config = ClientConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.store.name, "Yetta Karen");
    }

    #[test]
    fn test_toml_serialization() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[store]"));
    }
}
