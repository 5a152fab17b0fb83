//! Prometheus-backed metrics registry for the board server.
//!
//! Every [`MetricsRegistry`] owns its own `prometheus::Registry`; there is no
//! process-wide default registry, so several registries can coexist (tests,
//! embedded servers). Callers hold a [`Metrics`] handle, which is either
//! backed by a registry or disabled. A disabled handle turns every update
//! into a no-op, so call sites never need to check whether metrics are on.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use fbmetrics_core::error::{FbMetricsError, Result};
use fbmetrics_core::names::{
    INSTALLATION_LABEL, LABEL_BLOCK_TYPE, LABEL_BUILD_NUM, LABEL_EDITION, LABEL_VERSION,
    NAMESPACE, SUBSYSTEM_BLOCKS, SUBSYSTEM_SYSTEM, SUBSYSTEM_WORKSPACES,
};
use fbmetrics_core::InstanceInfo;

use super::runtime::RuntimeCollector;

/// Content type of the text exposition format.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// The application's instruments plus the registry they are registered in.
pub struct MetricsRegistry {
    registry: Registry,

    login_count: IntCounter,
    login_fail_count: IntCounter,

    blocks_inserted_count: IntCounter,
    blocks_deleted_count: IntCounter,

    block_count: IntGaugeVec,
    workspace_count: IntGauge,

    block_last_activity: Gauge,
}

impl MetricsRegistry {
    /// Build a registry and register every collector and instrument.
    ///
    /// Fails if any registration is rejected (duplicate or invalid name).
    /// Such a failure is a programming error and the server treats it as
    /// fatal.
    pub fn new(info: &InstanceInfo) -> Result<Self> {
        let registry = if info.has_installation_id() {
            let labels = HashMap::from([(
                INSTALLATION_LABEL.to_string(),
                info.installation_id.clone(),
            )]);
            Registry::new_custom(None, Some(labels))
                .map_err(|e| FbMetricsError::Registration(format!("registry labels: {e}")))?
        } else {
            Registry::new()
        };

        #[cfg(target_os = "linux")]
        {
            let process = prometheus::process_collector::ProcessCollector::new(
                std::process::id() as i32,
                NAMESPACE,
            );
            registry
                .register(Box::new(process))
                .map_err(|e| FbMetricsError::Registration(format!("process collector: {e}")))?;
        }
        registry
            .register(Box::new(RuntimeCollector::new()?))
            .map_err(|e| FbMetricsError::Registration(format!("runtime collector: {e}")))?;

        let login_count = register(
            &registry,
            IntCounter::with_opts(opts(SUBSYSTEM_SYSTEM, "login_total", "Total number of logins.")),
        )?;
        let login_fail_count = register(
            &registry,
            IntCounter::with_opts(opts(
                SUBSYSTEM_SYSTEM,
                "login_fail_total",
                "Total number of failed logins.",
            )),
        )?;

        let instance = register(
            &registry,
            IntGaugeVec::new(
                opts(
                    SUBSYSTEM_SYSTEM,
                    "focalboard_instance_info",
                    "Instance information for Focalboard.",
                ),
                &[LABEL_VERSION, LABEL_BUILD_NUM, LABEL_EDITION],
            ),
        )?;
        instance
            .get_metric_with_label_values(&[
                info.version.as_str(),
                info.build_num.as_str(),
                info.edition.as_str(),
            ])
            .map_err(|e| FbMetricsError::Registration(format!("instance info: {e}")))?
            .set(1);

        let start_time = register(
            &registry,
            Gauge::with_opts(opts(
                SUBSYSTEM_SYSTEM,
                "server_start_time",
                "The time the server started.",
            )),
        )?;
        start_time.set(now_secs());

        let blocks_inserted_count = register(
            &registry,
            IntCounter::with_opts(opts(
                SUBSYSTEM_BLOCKS,
                "blocks_inserted_total",
                "Total number of blocks inserted.",
            )),
        )?;
        let blocks_deleted_count = register(
            &registry,
            IntCounter::with_opts(opts(
                SUBSYSTEM_BLOCKS,
                "blocks_deleted_total",
                "Total number of blocks deleted.",
            )),
        )?;

        let block_count = register(
            &registry,
            IntGaugeVec::new(
                opts(SUBSYSTEM_BLOCKS, "blocks_total", "Total number of blocks."),
                &[LABEL_BLOCK_TYPE],
            ),
        )?;
        let workspace_count = register(
            &registry,
            IntGauge::with_opts(opts(
                SUBSYSTEM_WORKSPACES,
                "workspaces_total",
                "Total number of workspaces.",
            )),
        )?;

        let block_last_activity = register(
            &registry,
            Gauge::with_opts(opts(
                SUBSYSTEM_BLOCKS,
                "blocks_last_activity",
                "Time of last block insert, update, delete.",
            )),
        )?;

        tracing::info!(
            version = %info.version,
            build = %info.build_num,
            edition = %info.edition,
            cloud = info.has_installation_id(),
            "metrics registry initialized"
        );

        Ok(Self {
            registry,
            login_count,
            login_fail_count,
            blocks_inserted_count,
            blocks_deleted_count,
            block_count,
            workspace_count,
            block_last_activity,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn observe_block_count(&self, block_type: &str, count: i64) {
        // The only failure is a label cardinality mismatch, which cannot
        // happen with a single-label vec and a single value.
        if let Ok(g) = self.block_count.get_metric_with_label_values(&[block_type]) {
            g.set(count);
        }
    }
}

fn opts(subsystem: &str, name: &str, help: &str) -> Opts {
    Opts::new(name, help)
        .namespace(NAMESPACE)
        .subsystem(subsystem)
}

/// Register a freshly built instrument, keeping a handle for updates.
fn register<C>(registry: &Registry, built: prometheus::Result<C>) -> Result<C>
where
    C: Collector + Clone + 'static,
{
    let collector = built.map_err(|e| FbMetricsError::Registration(e.to_string()))?;
    let name = collector
        .desc()
        .first()
        .map(|d| d.fq_name.clone())
        .unwrap_or_default();
    registry
        .register(Box::new(collector.clone()))
        .map_err(|e| FbMetricsError::Registration(format!("{name}: {e}")))?;
    tracing::debug!(metric = %name, "registered");
    Ok(collector)
}

/// Seconds since the unix epoch, with sub-second precision.
fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Cheaply cloneable handle used by request handlers and the storage layer.
///
/// `Metrics::disabled()` (also the `Default`) is a null object: every update
/// is silently dropped and nothing is exposed.
#[derive(Clone, Default)]
pub struct Metrics {
    inner: Option<Arc<MetricsRegistry>>,
}

impl Metrics {
    pub fn new(info: &InstanceInfo) -> Result<Self> {
        Ok(Self { inner: Some(Arc::new(MetricsRegistry::new(info)?)) })
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Underlying registry, for handing to an exposition handler.
    pub fn registry(&self) -> Option<&Registry> {
        self.inner.as_deref().map(MetricsRegistry::registry)
    }

    pub fn increment_login_count(&self, n: u64) {
        if let Some(m) = &self.inner {
            m.login_count.inc_by(n);
        }
    }

    pub fn increment_login_fail_count(&self, n: u64) {
        if let Some(m) = &self.inner {
            m.login_fail_count.inc_by(n);
        }
    }

    pub fn increment_blocks_inserted(&self, n: u64) {
        if let Some(m) = &self.inner {
            m.blocks_inserted_count.inc_by(n);
            m.block_last_activity.set(now_secs());
        }
    }

    pub fn increment_blocks_deleted(&self, n: u64) {
        if let Some(m) = &self.inner {
            m.blocks_deleted_count.inc_by(n);
            m.block_last_activity.set(now_secs());
        }
    }

    /// Set (not add) the number of blocks of `block_type`.
    pub fn observe_block_count(&self, block_type: &str, count: i64) {
        if let Some(m) = &self.inner {
            m.observe_block_count(block_type, count);
        }
    }

    /// Set (not add) the number of workspaces.
    pub fn observe_workspace_count(&self, count: i64) {
        if let Some(m) = &self.inner {
            m.workspace_count.set(count);
        }
    }

    /// Snapshot every registered family. Empty when disabled.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry().map(Registry::gather).unwrap_or_default()
    }

    /// Render all families in the Prometheus text format.
    pub fn render(&self) -> Result<String> {
        let families = self.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| FbMetricsError::Encode(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| FbMetricsError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> InstanceInfo {
        InstanceInfo::new("7.10.0", "123", "personal", "")
    }

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|mf| mf.get_name() == name)
            .unwrap_or_else(|| panic!("missing family {name}"))
    }

    #[test]
    fn registers_application_families() {
        let metrics = Metrics::new(&info()).unwrap();
        let families = metrics.gather();
        for name in [
            "focalboard_system_login_total",
            "focalboard_system_login_fail_total",
            "focalboard_system_focalboard_instance_info",
            "focalboard_system_server_start_time",
            "focalboard_blocks_blocks_inserted_total",
            "focalboard_blocks_blocks_deleted_total",
            "focalboard_workspaces_workspaces_total",
            "focalboard_blocks_blocks_last_activity",
        ] {
            family(&families, name);
        }
    }

    #[test]
    fn instance_info_is_one_with_build_labels() {
        let metrics = Metrics::new(&info()).unwrap();
        let families = metrics.gather();
        let mf = family(&families, "focalboard_system_focalboard_instance_info");
        let m = &mf.get_metric()[0];
        assert_eq!(m.get_gauge().get_value(), 1.0);

        let labels: Vec<(&str, &str)> = m
            .get_label()
            .iter()
            .map(|l| (l.get_name(), l.get_value()))
            .collect();
        assert!(labels.contains(&("Version", "7.10.0")));
        assert!(labels.contains(&("BuildNum", "123")));
        assert!(labels.contains(&("Edition", "personal")));
    }

    #[test]
    fn start_time_is_set_at_construction() {
        let before = now_secs();
        let metrics = Metrics::new(&info()).unwrap();
        let families = metrics.gather();
        let v = family(&families, "focalboard_system_server_start_time").get_metric()[0]
            .get_gauge()
            .get_value();
        assert!(v >= before);
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let m = MetricsRegistry::new(&info()).unwrap();
        let err = register(
            m.registry(),
            IntCounter::with_opts(opts(SUBSYSTEM_SYSTEM, "login_total", "again")),
        )
        .err()
        .unwrap();
        assert_eq!(err.error_code().as_str(), "REGISTRATION");
    }

    #[test]
    fn disabled_exposes_nothing() {
        let metrics = Metrics::disabled();
        assert!(!metrics.is_enabled());
        assert!(metrics.registry().is_none());
        assert!(metrics.gather().is_empty());
        assert_eq!(metrics.render().unwrap(), "");
    }

    #[test]
    fn render_uses_text_format() {
        let metrics = Metrics::new(&info()).unwrap();
        metrics.increment_login_count(3);
        let text = metrics.render().unwrap();
        assert!(text.contains("# TYPE focalboard_system_login_total counter"));
        assert!(text.contains("focalboard_system_login_total 3"));
    }
}
