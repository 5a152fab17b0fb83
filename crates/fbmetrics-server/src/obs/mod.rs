//! Observability: the Prometheus metrics registry and its collectors.

pub mod metrics;
pub mod runtime;

pub use metrics::{Metrics, MetricsRegistry};
