// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfdrift Store
//!
//! Read-only access to the persisted statistics database.
//!
//! This crate is a thin collaborator: it opens a scoped SQLite connection,
//! answers one aggregate query, and releases the connection on drop. There
//! is no retry, reconnection, or caching here; a store failure is the
//! caller's problem and ends the run.

pub mod error;
pub mod stats;

pub use error::StoreError;
pub use stats::StatsDb;
