//! Process-wide configuration.
//!
//! Configuration is assembled exactly once at startup and passed by
//! reference to every component that needs it. Startup fails before any
//! network or database round-trip when a required key is absent.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::ClientCredentials;

// ============================================================================
// Environment Keys
// ============================================================================

/// OAuth2 client identifier.
pub const ENV_OAUTH_CLIENT_ID: &str = "OAUTH_CLIENT_ID";

/// OAuth2 client secret.
pub const ENV_OAUTH_CLIENT_SECRET: &str = "OAUTH_CLIENT_SECRET";

/// Default foundation name.
pub const ENV_FOUNDATION: &str = "FOUNDATION";

/// Control-plane base URL template; must contain [`FOUNDATION_PLACEHOLDER`].
pub const ENV_CC_URL: &str = "CC_URL";

/// Path of the statistics SQLite database.
pub const ENV_STATS_DB: &str = "STATS_DB";

/// Optional timeout override for outbound HTTP calls, in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

/// Placeholder substituted with the foundation name in the URL template.
pub const FOUNDATION_PLACEHOLDER: &str = "{foundation}";

/// Applied when [`ENV_HTTP_TIMEOUT_SECS`] is not set.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// App Config
// ============================================================================

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth2 client credentials used to mint bearer tokens.
    pub credentials: ClientCredentials,
    /// Default foundation to reconcile.
    pub foundation: String,
    /// Control-plane base URL template with a `{foundation}` placeholder.
    pub cc_url_template: String,
    /// Path of the statistics database.
    pub stats_db_path: PathBuf,
    /// Timeout applied to every outbound HTTP call.
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Assembles the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingConfiguration`] naming every absent required
    /// key, or [`CoreError::InvalidConfig`] for an unusable value.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Assembles the configuration through an arbitrary key lookup.
    ///
    /// Tests use this with a map instead of mutating the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing: Vec<String> = Vec::new();
        let mut require = |key: &str| -> Option<String> {
            match lookup(key) {
                Some(value) if !value.is_empty() => Some(value),
                _ => {
                    missing.push(key.to_string());
                    None
                }
            }
        };

        let client_id = require(ENV_OAUTH_CLIENT_ID);
        let client_secret = require(ENV_OAUTH_CLIENT_SECRET);
        let foundation = require(ENV_FOUNDATION);
        let cc_url_template = require(ENV_CC_URL);
        let stats_db_path = require(ENV_STATS_DB);

        let (
            Some(client_id),
            Some(client_secret),
            Some(foundation),
            Some(cc_url_template),
            Some(stats_db_path),
        ) = (
            client_id,
            client_secret,
            foundation,
            cc_url_template,
            stats_db_path,
        )
        else {
            return Err(CoreError::MissingConfiguration(missing));
        };

        if !cc_url_template.contains(FOUNDATION_PLACEHOLDER) {
            return Err(CoreError::InvalidConfig(format!(
                "{ENV_CC_URL} must contain the {FOUNDATION_PLACEHOLDER} placeholder"
            )));
        }

        let http_timeout = match lookup(ENV_HTTP_TIMEOUT_SECS) {
            Some(value) => {
                let secs: u64 = value.parse().map_err(|_| {
                    CoreError::InvalidConfig(format!(
                        "{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds, got {value:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_HTTP_TIMEOUT,
        };

        Ok(Self {
            credentials: ClientCredentials::new(client_id, client_secret),
            foundation,
            cc_url_template,
            stats_db_path: PathBuf::from(stats_db_path),
            http_timeout,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
