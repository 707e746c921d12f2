//! Token-guarded Cloud Controller fetcher.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use cfdrift_core::{AppConfig, AppCount, AppCountSource, ClientCredentials, FOUNDATION_PLACEHOLDER};

use crate::client::HttpClient;
use crate::error::FetchError;
use crate::token::{TokenBroker, UaaTokenBroker};

// ============================================================================
// Constants
// ============================================================================

/// API version segment of the count query.
const API_VERSION: &str = "v2";

/// Resource segment of the count query.
const APPS_RESOURCE: &str = "apps";

/// One initial attempt plus one retry after an authentication failure.
const MAX_ATTEMPTS: u32 = 2;

// ============================================================================
// Wire Types
// ============================================================================

/// Aggregated app listing, reduced to the count field.
#[derive(Debug, Deserialize)]
struct AppsPage {
    total_results: u64,
}

/// A bearer token together with the foundation it was minted for.
///
/// The tag keeps a token minted for one foundation from ever being
/// presented to another.
#[derive(Clone)]
struct CachedToken {
    foundation: String,
    token: String,
}

impl std::fmt::Debug for CachedToken {
    /// The token never reaches logs or panic output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("foundation", &self.foundation)
            .field("token", &"[redacted]")
            .finish()
    }
}

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches application counts from the Cloud Controller.
///
/// Holds at most one bearer token in memory. The token is acquired lazily,
/// cleared on any authentication failure, and never persisted. The public
/// entry point [`CloudControllerFetcher::app_count`] converts every
/// irrecoverable failure into [`AppCount::Unknown`] instead of an error.
#[derive(Debug)]
pub struct CloudControllerFetcher<B: TokenBroker = UaaTokenBroker> {
    http: HttpClient,
    url_template: String,
    credentials: ClientCredentials,
    broker: B,
    token: Option<CachedToken>,
}

impl CloudControllerFetcher {
    /// Creates a fetcher from the process configuration.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        Self::with_broker(config, UaaTokenBroker)
    }
}

impl<B: TokenBroker> CloudControllerFetcher<B> {
    /// Creates a fetcher with an explicit token broker.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn with_broker(config: &AppConfig, broker: B) -> Result<Self, FetchError> {
        debug!(client_id = %config.credentials.client_id, "Initializing fetcher");
        Ok(Self {
            http: HttpClient::new(config.http_timeout)?,
            url_template: config.cc_url_template.clone(),
            credentials: config.credentials.clone(),
            broker,
            token: None,
        })
    }

    /// Renders the control-plane base URL for `foundation`.
    fn base_url(&self, foundation: &str) -> String {
        self.url_template.replace(FOUNDATION_PLACEHOLDER, foundation)
    }

    /// Mints a fresh token, clearing the cache when acquisition fails.
    fn acquire_token(&mut self, foundation: &str) -> Result<String, FetchError> {
        let base_url = self.base_url(foundation);
        match self.broker.mint(&self.http, &base_url, &self.credentials) {
            Ok(token) => Ok(token),
            Err(err) => {
                self.token = None;
                Err(err)
            }
        }
    }

    /// Returns the authorization header value, acquiring and caching a
    /// token when no usable one is on hand.
    ///
    /// A cached token is reused only for the foundation it was minted
    /// for; a mismatch counts as a cache miss.
    fn authorization_header(&mut self, foundation: &str) -> Result<String, FetchError> {
        let cached = self
            .token
            .as_ref()
            .filter(|cached| cached.foundation == foundation)
            .map(|cached| cached.token.clone());

        let token = match cached {
            Some(token) => token,
            None => {
                let token = self.acquire_token(foundation)?;
                self.token = Some(CachedToken {
                    foundation: foundation.to_owned(),
                    token: token.clone(),
                });
                token
            }
        };

        Ok(format!("bearer {token}"))
    }

    /// One fetch attempt: build the count URL, attach the header, GET.
    fn request_app_count(&mut self, foundation: &str) -> Result<u64, FetchError> {
        let url = format!(
            "{}/{API_VERSION}/{APPS_RESOURCE}",
            self.base_url(foundation)
        );
        debug!(url = %url, "Sending count request");

        let header = self.authorization_header(foundation)?;
        let reply = self.http.get_with_auth(&url, &header)?;

        let status = reply.status();
        if status != StatusCode::OK {
            let body = reply.text().unwrap_or_default();
            warn!(status = %status, body = %body, "Count request rejected");
            return Err(FetchError::UnexpectedStatus(status));
        }

        let page: AppsPage = reply
            .json()
            .map_err(|err| FetchError::InvalidResponse(err.to_string()))?;
        Ok(page.total_results)
    }

    /// Returns the number of applications the Cloud Controller knows for
    /// `foundation`, or [`AppCount::Unknown`] when the fetch cannot be
    /// completed.
    ///
    /// An authentication failure discards the cached token and repeats the
    /// whole fetch, discovery included, exactly once. A second
    /// authentication failure, and any non-authentication failure on any
    /// attempt, ends the call with `Unknown`.
    pub fn app_count(&mut self, foundation: &str) -> AppCount {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.request_app_count(foundation) {
                Ok(count) => return AppCount::Known(count),
                Err(err) if err.is_auth() => {
                    self.token = None;
                    if attempt == MAX_ATTEMPTS {
                        warn!(foundation, "Count request failed, aborting");
                    } else {
                        warn!(foundation, "Count request failed, refreshing token and retrying");
                    }
                }
                Err(err) => {
                    warn!(foundation, error = %err, "Count request error");
                    return AppCount::Unknown;
                }
            }
        }
        AppCount::Unknown
    }
}

impl<B: TokenBroker> AppCountSource for CloudControllerFetcher<B> {
    fn app_count(&mut self, foundation: &str) -> AppCount {
        CloudControllerFetcher::app_count(self, foundation)
    }
}

// ============================================================================
// Tests
// ============================================================================
