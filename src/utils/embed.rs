use crate::services::system::{SystemLoadReport, Thresholds};
use crate::utils::format::{self, ReportField};
use crate::utils::theme::Theme;
use chrono::Local;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};

pub const COLOR_ERROR: u32 = 0xE74C3C; // Red

pub fn error(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("[ERROR] {}", title))
        .description(description)
        .color(COLOR_ERROR)
}

/// Placeholder shown while metrics are being collected.
pub fn loading(theme: &Theme) -> CreateEmbed {
    CreateEmbed::new()
        .title(&theme.title)
        .description(format!(
            "{} Fetching VPS system metrics...",
            theme.loading_glyph
        ))
        .color(theme.colors.info)
}

pub fn system_load(report: &SystemLoadReport, theme: &Theme, thresholds: &Thresholds) -> CreateEmbed {
    let color = theme
        .colors
        .for_severity(report.overall_severity(thresholds));

    let fields = [
        format::cpu_field(&report.cpu, theme, thresholds),
        format::memory_field(&report.memory, theme, thresholds),
        format::disk_field(&report.disk, theme, thresholds),
    ];

    CreateEmbed::new()
        .title(&theme.title)
        .description(format::host_line(&report.host, &report.cpu, theme))
        .fields(
            fields
                .into_iter()
                .map(|ReportField { name, value }| (name, value, true)),
        )
        .color(color)
        .footer(CreateEmbedFooter::new(footer_text(theme)))
}

pub fn load_failed(theme: &Theme, reason: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(&theme.error_title)
        .description(format!(
            "{} An error occurred while checking VPS system load.\n```{}```",
            theme.error_glyph, reason
        ))
        .color(theme.colors.danger)
}

fn footer_text(theme: &Theme) -> String {
    format!(
        "{} • Last updated: {}",
        theme.footer,
        Local::now().format("%H:%M:%S")
    )
}
