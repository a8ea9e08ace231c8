use super::MetricResult;
use super::probe::SystemProbe;
use super::status::{Severity, Thresholds};
use crate::error::{MetricError, MetricKind};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CpuMetrics {
    /// Whole-percent utilization across all cores.
    pub usage: f64,
    pub cores: usize,
    pub load_avg_1: f64,
    pub load_avg_5: f64,
    pub load_avg_15: f64,
}

impl CpuMetrics {
    pub fn severity(&self, thresholds: &Thresholds) -> Severity {
        Severity::from_percent(self.usage, thresholds)
    }

    /// Severities of the 1, 5 and 15 minute load averages.
    pub fn load_severities(&self, thresholds: &Thresholds) -> [Severity; 3] {
        [self.load_avg_1, self.load_avg_5, self.load_avg_15]
            .map(|load| Severity::from_load(load, self.cores, thresholds))
    }
}

pub fn collect(probe: &dyn SystemProbe, sample: Duration) -> MetricResult<CpuMetrics> {
    let unavailable = |reason: String| MetricError::unavailable(MetricKind::Cpu, reason);

    let load = probe.load_average().map_err(unavailable)?;
    let cpu = probe.cpu_usage(sample).map_err(unavailable)?;
    if cpu.cores == 0 {
        return Err(unavailable("no CPU reported by the OS".to_string()));
    }

    Ok(CpuMetrics {
        usage: f64::from(cpu.usage).clamp(0.0, 100.0).round(),
        cores: cpu.cores,
        load_avg_1: round2(load.one),
        load_avg_5: round2(load.five),
        load_avg_15: round2(load.fifteen),
    })
}

fn round2(value: f64) -> f64 {
    (value.max(0.0) * 100.0).round() / 100.0
}
