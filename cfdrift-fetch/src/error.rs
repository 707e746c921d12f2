//! Fetch error types.

use thiserror::Error;

/// Error type for Cloud Controller fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Authorization-endpoint discovery or token exchange failed.
    ///
    /// Deliberately carries no detail: transport errors, bad statuses,
    /// malformed payloads, and a missing access-token field all collapse
    /// into this one kind. Specifics are logged where they occur.
    #[error("failed to obtain an access token")]
    AuthDiscovery,

    /// HTTP transport failure on the count request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The count endpoint answered with an unexpected status.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The count endpoint answered with an unparseable body.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// True for failures on the token path, which are retried once.
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::AuthDiscovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_discovery_is_an_auth_failure() {
        assert!(FetchError::AuthDiscovery.is_auth());
        assert!(!FetchError::UnexpectedStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE).is_auth());
        assert!(!FetchError::InvalidResponse("nope".to_string()).is_auth());
    }
}
