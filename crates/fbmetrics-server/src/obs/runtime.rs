//! Tokio runtime collector.
//!
//! Reads the current runtime's metrics at scrape time. Outside a runtime the
//! collector yields no families.

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{IntGauge, Opts};
use tokio::runtime::Handle;

use fbmetrics_core::error::{FbMetricsError, Result};
use fbmetrics_core::names::{NAMESPACE, SUBSYSTEM_RUNTIME};

pub struct RuntimeCollector {
    workers: IntGauge,
    alive_tasks: IntGauge,
}

impl RuntimeCollector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            workers: runtime_gauge("workers", "Number of worker threads used by the runtime.")?,
            alive_tasks: runtime_gauge("alive_tasks", "Number of alive tasks in the runtime.")?,
        })
    }
}

fn runtime_gauge(name: &str, help: &str) -> Result<IntGauge> {
    let opts = Opts::new(name, help)
        .namespace(NAMESPACE)
        .subsystem(SUBSYSTEM_RUNTIME);
    IntGauge::with_opts(opts)
        .map_err(|e| FbMetricsError::Registration(format!("runtime_{name}: {e}")))
}

impl Collector for RuntimeCollector {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.workers.desc();
        descs.extend(self.alive_tasks.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let Ok(handle) = Handle::try_current() else {
            return Vec::new();
        };
        let m = handle.metrics();
        self.workers.set(m.num_workers() as i64);
        self.alive_tasks.set(m.num_alive_tasks() as i64);

        let mut families = self.workers.collect();
        families.extend(self.alive_tasks.collect());
        families
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_collected_outside_runtime() {
        let c = RuntimeCollector::new().unwrap();
        assert_eq!(c.desc().len(), 2);
        assert!(c.collect().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reports_worker_count_inside_runtime() {
        let c = RuntimeCollector::new().unwrap();
        let families = c.collect();
        assert_eq!(families.len(), 2);

        let workers = families
            .iter()
            .find(|mf| mf.get_name() == "focalboard_runtime_workers")
            .unwrap();
        assert_eq!(workers.get_metric()[0].get_gauge().get_value(), 2.0);
    }
}
