use super::probe::{CpuSample, DiskSample, LoadAverage, MemorySample, SystemProbe};
use crate::error::MetricKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scriptable probe for unit tests.
#[derive(Debug, Clone)]
pub struct FakeProbe {
    pub cpu_usage: f32,
    pub cores: usize,
    pub load: Result<(f64, f64, f64), String>,
    pub memory: Result<MemorySample, String>,
    pub disk: Result<DiskSample, String>,
    pub cpu_model: Option<String>,
    pub slow: Option<(MetricKind, Duration)>,
    pub panics: Option<MetricKind>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            cpu_usage: 12.0,
            cores: 4,
            load: Ok((0.5, 0.4, 0.3)),
            memory: Ok(MemorySample {
                total_bytes: 8 * 1024 * 1024 * 1024,
                free_bytes: 4 * 1024 * 1024 * 1024,
            }),
            disk: Ok(DiskSample {
                mount_point: PathBuf::from("/"),
                total_bytes: 100 * 1024 * 1024 * 1024,
                available_bytes: 60 * 1024 * 1024 * 1024,
            }),
            cpu_model: Some("Test CPU @ 3.00GHz".to_string()),
            slow: None,
            panics: None,
        }
    }
}

impl FakeProbe {
    fn enter(&self, metric: MetricKind) {
        if let Some((slow, delay)) = self.slow
            && slow == metric
        {
            std::thread::sleep(delay);
        }
        if self.panics == Some(metric) {
            panic!("{} probe exploded", metric);
        }
    }
}

impl SystemProbe for FakeProbe {
    fn cpu_usage(&self, _sample: Duration) -> Result<CpuSample, String> {
        self.enter(MetricKind::Cpu);
        Ok(CpuSample {
            usage: self.cpu_usage,
            cores: self.cores,
        })
    }

    fn load_average(&self) -> Result<LoadAverage, String> {
        self.load.clone().map(|(one, five, fifteen)| LoadAverage {
            one,
            five,
            fifteen,
        })
    }

    fn memory(&self) -> Result<MemorySample, String> {
        self.enter(MetricKind::Memory);
        self.memory.clone()
    }

    fn disk_usage(&self, _path: &Path) -> Result<DiskSample, String> {
        self.enter(MetricKind::Disk);
        self.disk.clone()
    }

    fn cpu_model(&self) -> Option<String> {
        self.cpu_model.clone()
    }

    fn os_name(&self) -> Option<String> {
        Some("TestOS 1.0".to_string())
    }

    fn hostname(&self) -> Option<String> {
        Some("test-host".to_string())
    }
}
