//! Blocking HTTP client construction.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{header, redirect};
use tracing::debug;

use crate::error::FetchError;

/// Blocking HTTP client for control-plane and UAA calls.
///
/// Certificate validation is disabled: foundations routinely present
/// self-signed certificates on both the Cloud Controller and the UAA.
/// Redirects are disabled so the token exchange never follows one.
/// Every request carries the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] if the underlying client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cfdrift/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { inner })
    }

    /// Performs an unauthenticated GET request.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] on transport failure.
    pub fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!(url = %url, "Sending request");
        Ok(self.inner.get(url).send()?)
    }

    /// Performs a GET request with an authorization header attached.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] on transport failure.
    pub fn get_with_auth(&self, url: &str, auth_header: &str) -> Result<Response, FetchError> {
        debug!(url = %url, "Sending authenticated request");
        Ok(self
            .inner
            .get(url)
            .header(header::AUTHORIZATION, auth_header)
            .send()?)
    }

    /// The underlying client, handed to the OAuth2 token exchange.
    pub(crate) fn inner(&self) -> &Client {
        &self.inner
    }
}
