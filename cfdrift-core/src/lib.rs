// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfdrift Core
//!
//! Core types, configuration, and traits for cfdrift.
//!
//! This crate provides the foundational abstractions used across the other
//! cfdrift crates:
//!
//! - [`AppCount`] - an application count, or the explicit `unknown` sentinel
//! - [`ClientCredentials`] - the OAuth2 client id/secret pair
//! - [`AppConfig`] - process-wide configuration, assembled once at startup
//! - [`AppCountSource`] / [`CountStore`] - the seams between the reconciler
//!   and its two collaborators
//! - [`CoreError`] - error type shared across crate boundaries

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export configuration
pub use config::{AppConfig, FOUNDATION_PLACEHOLDER};

// Re-export model types
pub use models::{AppCount, ClientCredentials};

// Re-export traits
pub use traits::{AppCountSource, CountStore};
