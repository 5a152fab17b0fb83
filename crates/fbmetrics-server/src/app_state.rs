//! Shared application state.
//!
//! Owns the config, the build identity, and the metrics handle. Request
//! handlers and the storage layer get the handle via `metrics()`.

use std::sync::Arc;

use fbmetrics_core::error::Result;
use fbmetrics_core::InstanceInfo;

use crate::config::ServerConfig;
use crate::obs::Metrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Metrics,
}

struct AppStateInner {
    cfg: ServerConfig,
    instance: InstanceInfo,
}

impl AppState {
    /// Build application state for this process.
    /// A metrics registration failure is returned, not panicked on.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let instance = InstanceInfo::current(cfg.instance.edition.clone());
        Self::with_instance(cfg, instance)
    }

    pub fn with_instance(cfg: ServerConfig, instance: InstanceInfo) -> Result<Self> {
        let metrics = if cfg.metrics.enabled {
            Metrics::new(&instance)?
        } else {
            tracing::warn!("metrics disabled by config; updates will be dropped");
            Metrics::disabled()
        };

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, instance }),
            metrics,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn instance(&self) -> &InstanceInfo {
        &self.inner.instance
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
