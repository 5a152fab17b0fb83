//! fbmetrics server library entry.
//!
//! Wires config, the metrics registry, and the ops endpoints into an axum
//! router. Used by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
