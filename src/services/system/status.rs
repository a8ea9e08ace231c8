/// Severity tier derived from a raw metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
}

/// Threshold set used to classify metric values.
///
/// Percentage bounds are closed (`p >= warning_percent` is a warning), load bounds are
/// strict (`load > cores * load_warning_ratio` is a warning).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning_percent: f64,
    pub critical_percent: f64,
    pub load_warning_ratio: f64,
    pub load_critical_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_percent: 70.0,
            critical_percent: 90.0,
            load_warning_ratio: 0.7,
            load_critical_ratio: 1.0,
        }
    }
}

impl Severity {
    pub fn from_percent(percent: f64, thresholds: &Thresholds) -> Self {
        if percent >= thresholds.critical_percent {
            Severity::Critical
        } else if percent >= thresholds.warning_percent {
            Severity::Warning
        } else {
            Severity::Healthy
        }
    }

    /// Classifies a load average relative to the number of cores.
    pub fn from_load(load: f64, cores: usize, thresholds: &Thresholds) -> Self {
        let cores = cores as f64;
        if load > cores * thresholds.load_critical_ratio {
            Severity::Critical
        } else if load > cores * thresholds.load_warning_ratio {
            Severity::Warning
        } else {
            Severity::Healthy
        }
    }
}
