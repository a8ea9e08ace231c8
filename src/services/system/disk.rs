use super::MetricResult;
use super::probe::SystemProbe;
use super::status::{Severity, Thresholds};
use crate::error::{MetricError, MetricKind};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct DiskMetrics {
    pub usage_percent: f64,
    pub used: u64,
    pub free: u64,
    pub total: u64,
    pub mount_point: String,
}

impl DiskMetrics {
    pub fn severity(&self, thresholds: &Thresholds) -> Severity {
        Severity::from_percent(self.usage_percent, thresholds)
    }
}

pub fn collect(probe: &dyn SystemProbe, path: &Path) -> MetricResult<DiskMetrics> {
    let sample = probe
        .disk_usage(path)
        .map_err(|reason| MetricError::unavailable(MetricKind::Disk, reason))?;

    if sample.total_bytes == 0 {
        return Err(MetricError::unavailable(
            MetricKind::Disk,
            format!("{} reports a size of 0", sample.mount_point.display()),
        ));
    }
    let free = sample.available_bytes.min(sample.total_bytes);
    let used = sample.total_bytes - free;

    Ok(DiskMetrics {
        usage_percent: (used as f64 / sample.total_bytes as f64 * 100.0).round(),
        used,
        free,
        total: sample.total_bytes,
        mount_point: sample.mount_point.to_string_lossy().to_string(),
    })
}

/// Picks the mount point with the longest component-wise prefix of `path`.
pub fn containing_mount<'a>(
    path: &Path,
    mounts: impl IntoIterator<Item = &'a Path>,
) -> Option<&'a Path> {
    mounts
        .into_iter()
        .filter(|mount| path.starts_with(mount))
        .max_by_key(|mount| mount.components().count())
}
