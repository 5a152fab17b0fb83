//! fbmetrics core: error types, build identity, and metric naming shared by
//! the server crate and any embedding application.
//!
//! This crate carries no runtime or instrumentation dependencies so the same
//! types can be used by code that records metrics without owning a registry.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod instance;
pub mod names;

/// Shared result type.
pub use error::{FbMetricsError, Result};
pub use instance::InstanceInfo;
