use crate::services::system::{
    CpuMetrics, DiskMetrics, HostInfo, MemoryMetrics, MetricResult, Thresholds,
};
use crate::utils::theme::{BarStyle, Theme};

/// One rendered section of a load report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub name: String,
    pub value: String,
}

pub fn progress_bar(percent: f64, bar: &BarStyle) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * bar.width as f64).round() as usize;
    let filled = filled.min(bar.width);
    format!(
        "{}{}",
        bar.filled.repeat(filled),
        bar.empty.repeat(bar.width - filled)
    )
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// `"<glyph> <model> <cores> CORES"`, followed by `"<os> • <hostname>"` when known.
pub fn host_line(host: &HostInfo, cpu: &MetricResult<CpuMetrics>, theme: &Theme) -> String {
    let model = host.cpu_model.as_deref().unwrap_or("Unknown CPU");
    let header = match cpu {
        Ok(cpu) => format!("**{} {} {} CORES**", theme.host_glyph, model, cpu.cores),
        Err(_) => format!("**{} {}**", theme.host_glyph, model),
    };

    let details: Vec<&str> = [host.os.as_deref(), host.hostname.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if details.is_empty() {
        header
    } else {
        format!("{}\n{}", header, details.join(" • "))
    }
}

pub fn cpu_field(
    cpu: &MetricResult<CpuMetrics>,
    theme: &Theme,
    thresholds: &Thresholds,
) -> ReportField {
    let cpu = match cpu {
        Ok(cpu) => cpu,
        Err(_) => return unavailable_field("CPU", theme),
    };

    let [one, five, fifteen] = cpu.load_severities(thresholds);
    let value = [
        usage_line(cpu.usage),
        progress_bar(cpu.usage, &theme.bar),
        String::new(),
        "**Load Avg**".to_string(),
        format!("{} {} (1m)", theme.load.get(one), cpu.load_avg_1),
        format!("{} {} (5m)", theme.load.get(five), cpu.load_avg_5),
        format!("{} {} (15m)", theme.load.get(fifteen), cpu.load_avg_15),
    ]
    .join("\n");

    ReportField {
        name: format!("{} CPU", theme.status.get(cpu.severity(thresholds))),
        value,
    }
}

pub fn memory_field(
    memory: &MetricResult<MemoryMetrics>,
    theme: &Theme,
    thresholds: &Thresholds,
) -> ReportField {
    let memory = match memory {
        Ok(memory) => memory,
        Err(_) => return unavailable_field("Memory", theme),
    };

    let value = [
        usage_line(memory.usage_percent),
        progress_bar(memory.usage_percent, &theme.bar),
        String::new(),
        format!("**Used :** {} MB", memory.used_mb),
        format!("**Free :** {} MB", memory.free_mb),
        format!("**Total :** {} MB", memory.total_mb),
    ]
    .join("\n");

    ReportField {
        name: format!("{} Memory", theme.status.get(memory.severity(thresholds))),
        value,
    }
}

pub fn disk_field(
    disk: &MetricResult<DiskMetrics>,
    theme: &Theme,
    thresholds: &Thresholds,
) -> ReportField {
    let disk = match disk {
        Ok(disk) => disk,
        Err(_) => return unavailable_field("Disk", theme),
    };

    let value = [
        usage_line(disk.usage_percent),
        progress_bar(disk.usage_percent, &theme.bar),
        String::new(),
        format!("**Used :** {}", format_bytes(disk.used)),
        format!("**Free :** {}", format_bytes(disk.free)),
        format!("**Total :** {}", format_bytes(disk.total)),
        format!("**Mount :** `{}`", disk.mount_point),
    ]
    .join("\n");

    ReportField {
        name: format!("{} Disk", theme.status.get(disk.severity(thresholds))),
        value,
    }
}

fn usage_line(percent: f64) -> String {
    format!("**Usage :** {:.0}%", percent)
}

fn unavailable_field(label: &str, theme: &Theme) -> ReportField {
    ReportField {
        name: format!("{} {}", theme.error_glyph, label),
        value: format!(
            "{} Unable to retrieve {} data",
            theme.unavailable_glyph,
            label.to_lowercase()
        ),
    }
}
