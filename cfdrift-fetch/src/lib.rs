// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfdrift Fetch
//!
//! The token-guarded Cloud Controller fetcher.
//!
//! Fetching a count is a three-step protocol, all over blocking HTTP:
//!
//! 1. [`discovery`] - GET the control-plane root and read the UAA
//!    authorization-service reference out of its self-description.
//! 2. [`token`] - exchange the configured client credentials for a bearer
//!    token at the discovered endpoint (OAuth2 client-credentials grant).
//! 3. [`cloud_controller`] - GET the aggregated app listing with the token
//!    attached, reusing a cached token when one is on hand and recovering
//!    from an authentication failure by re-acquiring exactly once.
//!
//! Every failure on the token path collapses into
//! [`FetchError::AuthDiscovery`]; the public entry point
//! [`CloudControllerFetcher::app_count`] never fails at all, reporting
//! `AppCount::Unknown` instead.

pub mod client;
pub mod cloud_controller;
pub mod discovery;
pub mod error;
pub mod token;

// Re-export key types at crate root
pub use client::HttpClient;
pub use cloud_controller::CloudControllerFetcher;
pub use error::FetchError;
pub use token::{TokenBroker, UaaTokenBroker};
