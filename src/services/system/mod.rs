//! Point-in-time host load collection.
//!
//! [`MetricsCollector::system_load`] queries CPU, memory and disk concurrently. Each
//! metric succeeds or fails on its own; only a broken collector task fails the report.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod probe;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use cpu::CpuMetrics;
pub use disk::DiskMetrics;
pub use memory::MemoryMetrics;
pub use probe::{SysinfoProbe, SystemProbe};
pub use status::{Severity, Thresholds};

use crate::error::{CollectionError, MetricError, MetricKind};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single metric query.
pub type MetricResult<T> = Result<T, MetricError>;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CPU_SAMPLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorSettings {
    /// Any path on the filesystem to report disk usage for.
    pub disk_path: PathBuf,
    /// Upper bound for each sub-query.
    pub query_timeout: Duration,
    pub cpu_sample: Duration,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            disk_path: PathBuf::from("/"),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            cpu_sample: DEFAULT_CPU_SAMPLE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub cpu_model: Option<String>,
    pub os: Option<String>,
    pub hostname: Option<String>,
}

impl HostInfo {
    fn from_probe(probe: &dyn SystemProbe) -> Self {
        Self {
            cpu_model: probe.cpu_model(),
            os: probe.os_name(),
            hostname: probe.hostname(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemLoadReport {
    pub host: HostInfo,
    pub cpu: MetricResult<CpuMetrics>,
    pub memory: MetricResult<MemoryMetrics>,
    pub disk: MetricResult<DiskMetrics>,
}

impl SystemLoadReport {
    /// Highest tier among the metrics that succeeded, `None` if all of them failed.
    pub fn overall_severity(&self, thresholds: &Thresholds) -> Option<Severity> {
        [
            self.cpu.as_ref().ok().map(|cpu| cpu.severity(thresholds)),
            self.memory.as_ref().ok().map(|mem| mem.severity(thresholds)),
            self.disk.as_ref().ok().map(|disk| disk.severity(thresholds)),
        ]
        .into_iter()
        .flatten()
        .max()
    }

    pub fn failures(&self) -> Vec<&MetricError> {
        [
            self.cpu.as_ref().err(),
            self.memory.as_ref().err(),
            self.disk.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_partial(&self) -> bool {
        let failed = self.failures().len();
        failed > 0 && failed < 3
    }
}

#[derive(Clone)]
pub struct MetricsCollector {
    probe: Arc<dyn SystemProbe>,
    settings: CollectorSettings,
}

impl fmt::Debug for MetricsCollector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MetricsCollector")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl MetricsCollector {
    pub fn new(settings: CollectorSettings) -> Self {
        Self::with_probe(Arc::new(SysinfoProbe), settings)
    }

    pub fn with_probe(probe: Arc<dyn SystemProbe>, settings: CollectorSettings) -> Self {
        Self { probe, settings }
    }

    /// Blocks for the CPU sampling interval.
    pub fn cpu_metrics(&self) -> MetricResult<CpuMetrics> {
        cpu::collect(self.probe.as_ref(), self.settings.cpu_sample)
    }

    pub fn memory_metrics(&self) -> MetricResult<MemoryMetrics> {
        memory::collect(self.probe.as_ref())
    }

    pub fn disk_metrics(&self) -> MetricResult<DiskMetrics> {
        disk::collect(self.probe.as_ref(), &self.settings.disk_path)
    }

    pub fn host_info(&self) -> HostInfo {
        HostInfo::from_probe(self.probe.as_ref())
    }

    /// Collects all metrics concurrently, each bounded by the query timeout.
    pub async fn system_load(&self) -> Result<SystemLoadReport, CollectionError> {
        let sample = self.settings.cpu_sample;
        let disk_path = self.settings.disk_path.clone();

        let (host, cpu, memory, disk) = tokio::join!(
            self.run(MetricKind::Host, HostInfo::default, HostInfo::from_probe),
            self.run_metric(MetricKind::Cpu, move |probe| cpu::collect(probe, sample)),
            self.run_metric(MetricKind::Memory, |probe| memory::collect(probe)),
            self.run_metric(MetricKind::Disk, move |probe| {
                disk::collect(probe, &disk_path)
            }),
        );

        let report = SystemLoadReport {
            host: host?,
            cpu: cpu?,
            memory: memory?,
            disk: disk?,
        };
        debug!(
            failed = report.failures().len(),
            "[SYS] System load collected"
        );
        Ok(report)
    }

    async fn run_metric<T, F>(
        &self,
        metric: MetricKind,
        query: F,
    ) -> Result<MetricResult<T>, CollectionError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SystemProbe) -> MetricResult<T> + Send + 'static,
    {
        let after = self.settings.query_timeout;
        self.run(
            metric,
            move || Err(MetricError::TimedOut { metric, after }),
            query,
        )
        .await
    }

    /// Runs `query` on the blocking pool. A timed out query yields `on_timeout()`; the
    /// blocking thread is left to finish on its own.
    async fn run<T, F, D>(
        &self,
        metric: MetricKind,
        on_timeout: D,
        query: F,
    ) -> Result<T, CollectionError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SystemProbe) -> T + Send + 'static,
        D: FnOnce() -> T,
    {
        let probe = Arc::clone(&self.probe);
        let task = tokio::task::spawn_blocking(move || query(probe.as_ref()));

        match tokio::time::timeout(self.settings.query_timeout, task).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CollectionError::Task {
                metric,
                reason: e.to_string(),
            }),
            Err(_) => {
                warn!(
                    "[SYS] {} query exceeded {:?}",
                    metric, self.settings.query_timeout
                );
                Ok(on_timeout())
            }
        }
    }
}
