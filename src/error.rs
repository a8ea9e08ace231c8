use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug)]
pub enum BotError {
    Config(String),
    Client(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BotError::Client(msg) => write!(f, "Client error: {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

pub type Result<T> = std::result::Result<T, BotError>;

/// The metric a query or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Host,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "memory",
            MetricKind::Disk => "disk",
            MetricKind::Host => "host",
        };
        f.write_str(name)
    }
}

/// Failure of a single metric. Never aborts the other metrics of a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("{metric} metrics unavailable: {reason}")]
    Unavailable { metric: MetricKind, reason: String },
    #[error("{metric} query timed out after {after:?}")]
    TimedOut { metric: MetricKind, after: Duration },
}

impl MetricError {
    pub fn unavailable(metric: MetricKind, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            metric,
            reason: reason.into(),
        }
    }

    pub fn metric(&self) -> MetricKind {
        match self {
            Self::Unavailable { metric, .. } | Self::TimedOut { metric, .. } => *metric,
        }
    }
}

/// Failure of the report as a whole.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("{metric} collector task failed: {reason}")]
    Task { metric: MetricKind, reason: String },
}
