//! OAuth2 client-credentials token exchange.

use oauth2::basic::BasicClient;
use oauth2::{ClientId, ClientSecret, TokenResponse, TokenUrl};
use tracing::{debug, warn};

use cfdrift_core::ClientCredentials;

use crate::client::HttpClient;
use crate::discovery::discover_token_url;
use crate::error::FetchError;

// ============================================================================
// Token Broker
// ============================================================================

/// Mints bearer tokens for a foundation's control plane.
///
/// The seam between the fetcher's retry state machine and the token
/// acquisition protocol; tests script this to drive the state machine
/// without a UAA.
pub trait TokenBroker {
    /// Obtains a fresh bearer token for the control plane at `base_url`.
    ///
    /// # Errors
    ///
    /// [`FetchError::AuthDiscovery`] for every failure mode.
    fn mint(
        &mut self,
        http: &HttpClient,
        base_url: &str,
        credentials: &ClientCredentials,
    ) -> Result<String, FetchError>;
}

/// Discovers the UAA endpoint and performs the client-credentials grant.
///
/// The endpoint is re-discovered on every mint; nothing here is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct UaaTokenBroker;

impl TokenBroker for UaaTokenBroker {
    fn mint(
        &mut self,
        http: &HttpClient,
        base_url: &str,
        credentials: &ClientCredentials,
    ) -> Result<String, FetchError> {
        let token_url = discover_token_url(http, base_url)?;
        exchange_client_credentials(http, &token_url, credentials)
    }
}

// ============================================================================
// Token Exchange
// ============================================================================

/// Exchanges client credentials for a bearer token at `token_url`.
///
/// # Errors
///
/// [`FetchError::AuthDiscovery`] for every failure mode - an invalid token
/// URL, a transport error, an error response, or a response without an
/// access-token field. The cause is logged here, not reported to the
/// caller.
pub fn exchange_client_credentials(
    http: &HttpClient,
    token_url: &str,
    credentials: &ClientCredentials,
) -> Result<String, FetchError> {
    let token_url = match TokenUrl::new(token_url.to_owned()) {
        Ok(url) => url,
        Err(err) => {
            warn!(url = %token_url, error = %err, "Token endpoint URL is not valid");
            return Err(FetchError::AuthDiscovery);
        }
    };

    debug!(url = %token_url.as_str(), client_id = %credentials.client_id, "Fetching token");
    let client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
        .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
        .set_token_uri(token_url);

    match client.exchange_client_credentials().request(http.inner()) {
        Ok(response) => Ok(response.access_token().secret().clone()),
        Err(err) => {
            warn!(error = %err, "Token exchange failed");
            Err(FetchError::AuthDiscovery)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
