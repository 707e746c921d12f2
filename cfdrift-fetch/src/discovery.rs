//! Authorization-endpoint discovery.
//!
//! The Cloud Controller root endpoint describes the platform, including a
//! reference to the UAA authorization service it trusts. The token endpoint
//! is that service's root with `/oauth/token` appended. Discovery runs on
//! every token acquisition, retries included; the result is never cached.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::client::HttpClient;
use crate::error::FetchError;

/// Suffix appended to the discovered authorization-service root.
const TOKEN_SUFFIX: &str = "oauth/token";

/// Control-plane self-description, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct SelfDescription {
    links: PlatformLinks,
}

#[derive(Debug, Deserialize)]
struct PlatformLinks {
    uaa: PlatformLink,
}

#[derive(Debug, Deserialize)]
struct PlatformLink {
    href: String,
}

/// Resolves the token endpoint for the control plane at `base_url`.
///
/// # Errors
///
/// [`FetchError::AuthDiscovery`] for every failure mode - an invalid base
/// URL, a transport error, a non-200 status, or a payload without the
/// expected fields. The cause is logged here, not reported to the caller.
pub fn discover_token_url(http: &HttpClient, base_url: &str) -> Result<String, FetchError> {
    if let Err(err) = Url::parse(base_url) {
        warn!(url = %base_url, error = %err, "Control-plane URL is not valid");
        return Err(FetchError::AuthDiscovery);
    }

    let reply = match http.get(base_url) {
        Ok(reply) => reply,
        Err(err) => {
            warn!(url = %base_url, error = %err, "Self-description request failed");
            return Err(FetchError::AuthDiscovery);
        }
    };

    if reply.status() != StatusCode::OK {
        warn!(url = %base_url, status = %reply.status(), "Self-description request rejected");
        return Err(FetchError::AuthDiscovery);
    }

    let description: SelfDescription = match reply.json() {
        Ok(description) => description,
        Err(err) => {
            warn!(url = %base_url, error = %err, "Self-description payload is malformed");
            return Err(FetchError::AuthDiscovery);
        }
    };

    let token_url = format!("{}/{TOKEN_SUFFIX}", description.links.uaa.href);
    debug!(url = %token_url, "Discovered token endpoint");
    Ok(token_url)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client() -> HttpClient {
        HttpClient::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn appends_token_suffix_to_discovered_href() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"links":{"uaa":{"href":"https://uaa.sys.example.com"}}}"#);
        });

        let token_url = discover_token_url(&client(), &server.base_url()).unwrap();

        assert_eq!(token_url, "https://uaa.sys.example.com/oauth/token");
        mock.assert();
    }

    #[test]
    fn non_200_status_is_a_discovery_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(418).body("short and stout");
        });

        let err = discover_token_url(&client(), &server.base_url()).unwrap_err();
        assert!(matches!(err, FetchError::AuthDiscovery));
    }

    #[test]
    fn payload_without_uaa_link_is_a_discovery_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"links":{}}"#);
        });

        let err = discover_token_url(&client(), &server.base_url()).unwrap_err();
        assert!(matches!(err, FetchError::AuthDiscovery));
    }

    #[test]
    fn unreachable_control_plane_is_a_discovery_failure() {
        // Nothing listens on port 1.
        let err = discover_token_url(&client(), "http://127.0.0.1:1").unwrap_err();
        assert!(matches!(err, FetchError::AuthDiscovery));
    }

    #[test]
    fn invalid_base_url_is_a_discovery_failure() {
        let err = discover_token_url(&client(), "not a url at all").unwrap_err();
        assert!(matches!(err, FetchError::AuthDiscovery));
    }
}
