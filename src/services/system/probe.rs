use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, System};

#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub usage: f32,
    pub cores: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskSample {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// OS facilities the collector reads from.
///
/// Every call is blocking and may be slow; the collector runs them on the blocking pool.
pub trait SystemProbe: Send + Sync {
    /// Utilization across all cores, measured over `sample`.
    fn cpu_usage(&self, sample: Duration) -> Result<CpuSample, String>;

    fn load_average(&self) -> Result<LoadAverage, String>;

    fn memory(&self) -> Result<MemorySample, String>;

    /// Usage of the filesystem that contains `path`.
    fn disk_usage(&self, path: &Path) -> Result<DiskSample, String>;

    fn cpu_model(&self) -> Option<String>;

    fn os_name(&self) -> Option<String>;

    fn hostname(&self) -> Option<String>;
}

/// [`SystemProbe`] backed by `sysinfo`. Builds fresh handles on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProbe;

impl SystemProbe for SysinfoProbe {
    fn cpu_usage(&self, sample: Duration) -> Result<CpuSample, String> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err("CPU sampling is not supported on this platform".to_string());
        }

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        // Usage is a delta between two refreshes.
        std::thread::sleep(sample.max(MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_usage();

        let cores = sys.cpus().len();
        if cores == 0 {
            return Err("no CPU reported by the OS".to_string());
        }

        Ok(CpuSample {
            usage: sys.global_cpu_usage(),
            cores,
        })
    }

    fn load_average(&self) -> Result<LoadAverage, String> {
        if cfg!(target_os = "windows") || !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err("load averages are not exposed on this platform".to_string());
        }

        let load = System::load_average();
        Ok(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    fn memory(&self) -> Result<MemorySample, String> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err("total memory reported as 0".to_string());
        }

        Ok(MemorySample {
            total_bytes,
            free_bytes: sys.available_memory(),
        })
    }

    fn disk_usage(&self, path: &Path) -> Result<DiskSample, String> {
        let disks = Disks::new_with_refreshed_list();
        let mounts = disks.list().iter().map(|d| d.mount_point());
        let mount = super::disk::containing_mount(path, mounts)
            .ok_or_else(|| format!("no mounted filesystem contains {}", path.display()))?;

        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| format!("filesystem {} disappeared", mount.display()))?;

        Ok(DiskSample {
            mount_point: disk.mount_point().to_path_buf(),
            total_bytes: disk.total_space(),
            available_bytes: disk.available_space(),
        })
    }

    fn cpu_model(&self) -> Option<String> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    fn os_name(&self) -> Option<String> {
        System::long_os_version()
    }

    fn hostname(&self) -> Option<String> {
        System::host_name()
    }
}
