use super::MetricResult;
use super::probe::SystemProbe;
use super::status::{Severity, Thresholds};
use crate::error::{MetricError, MetricKind};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Physical memory in whole megabytes. `used_mb + free_mb == total_mb` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryMetrics {
    pub usage_percent: f64,
    pub used_mb: u64,
    pub free_mb: u64,
    pub total_mb: u64,
}

impl MemoryMetrics {
    pub fn severity(&self, thresholds: &Thresholds) -> Severity {
        Severity::from_percent(self.usage_percent, thresholds)
    }
}

pub fn collect(probe: &dyn SystemProbe) -> MetricResult<MemoryMetrics> {
    let sample = probe
        .memory()
        .map_err(|reason| MetricError::unavailable(MetricKind::Memory, reason))?;

    let total_mb = sample.total_bytes / BYTES_PER_MB;
    if total_mb == 0 {
        return Err(MetricError::unavailable(
            MetricKind::Memory,
            "total memory below 1 MB",
        ));
    }
    let free_mb = (sample.free_bytes / BYTES_PER_MB).min(total_mb);
    let used_mb = total_mb - free_mb;

    Ok(MemoryMetrics {
        usage_percent: (used_mb as f64 / total_mb as f64 * 100.0).round(),
        used_mb,
        free_mb,
        total_mb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::system::probe::MemorySample;
    use crate::services::system::testing::FakeProbe;

    fn probe(total_bytes: u64, free_bytes: u64) -> FakeProbe {
        FakeProbe {
            memory: Ok(MemorySample {
                total_bytes,
                free_bytes,
            }),
            ..FakeProbe::default()
        }
    }

    #[test]
    fn used_plus_free_is_total() {
        for (total, free) in [
            (8 * 1024 * BYTES_PER_MB, 3 * 1024 * BYTES_PER_MB + 12345),
            (2_000_000_000, 1_999_999_999),
            (16 * 1024 * BYTES_PER_MB, 0),
            (3 * BYTES_PER_MB + 1, 3 * BYTES_PER_MB + 1),
        ] {
            let mem = collect(&probe(total, free)).unwrap();
            assert_eq!(mem.used_mb + mem.free_mb, mem.total_mb);
            assert_eq!(
                mem.usage_percent,
                (mem.used_mb as f64 / mem.total_mb as f64 * 100.0).round()
            );
        }
    }

    #[test]
    fn computes_percentage() {
        let mem = collect(&probe(4096 * BYTES_PER_MB, 1024 * BYTES_PER_MB)).unwrap();
        assert_eq!(mem.total_mb, 4096);
        assert_eq!(mem.free_mb, 1024);
        assert_eq!(mem.used_mb, 3072);
        assert_eq!(mem.usage_percent, 75.0);
        assert_eq!(mem.severity(&Thresholds::default()), Severity::Warning);
    }

    #[test]
    fn free_above_total_is_clamped() {
        let mem = collect(&probe(1024 * BYTES_PER_MB, 2048 * BYTES_PER_MB)).unwrap();
        assert_eq!(mem.free_mb, 1024);
        assert_eq!(mem.used_mb, 0);
        assert_eq!(mem.usage_percent, 0.0);
    }

    #[test]
    fn tiny_total_is_unavailable() {
        let err = collect(&probe(1000, 10)).unwrap_err();
        assert_eq!(err.metric(), MetricKind::Memory);
    }

    #[test]
    fn probe_failure_is_unavailable() {
        let probe = FakeProbe {
            memory: Err("meminfo unreadable".to_string()),
            ..FakeProbe::default()
        };
        let err = collect(&probe).unwrap_err();
        assert_eq!(
            err.to_string(),
            "memory metrics unavailable: meminfo unreadable"
        );
    }
}
