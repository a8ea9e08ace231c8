use crate::services::system::Severity;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Glyphs, colors and labels used to render a load report.
///
/// Loaded from a JSON file when one is configured; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub title: String,
    pub error_title: String,
    pub footer: String,
    pub status: SeverityGlyphs,
    pub load: SeverityGlyphs,
    pub colors: Colors,
    pub bar: BarStyle,
    pub loading_glyph: String,
    pub host_glyph: String,
    pub error_glyph: String,
    pub unavailable_glyph: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeverityGlyphs {
    pub healthy: String,
    pub warning: String,
    pub critical: String,
}

impl SeverityGlyphs {
    pub fn get(&self, severity: Severity) -> &str {
        match severity {
            Severity::Healthy => &self.healthy,
            Severity::Warning => &self.warning,
            Severity::Critical => &self.critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub success: u32,
    pub warning: u32,
    pub danger: u32,
    pub info: u32,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            success: 0x2ECC71,
            warning: 0xF39C12,
            danger: 0xE74C3C,
            info: 0x3498DB,
        }
    }
}

impl Colors {
    /// Color of a report; a report without any successful metric is shown as danger.
    pub fn for_severity(&self, severity: Option<Severity>) -> u32 {
        match severity {
            Some(Severity::Healthy) => self.success,
            Some(Severity::Warning) => self.warning,
            Some(Severity::Critical) | None => self.danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub filled: String,
    pub empty: String,
    pub width: usize,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            filled: "▰".to_string(),
            empty: "▱".to_string(),
            width: 8,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "VPS System Load".to_string(),
            error_title: "Error Checking VPS Load".to_string(),
            footer: "vpsload".to_string(),
            status: SeverityGlyphs {
                healthy: "✅".to_string(),
                warning: "⚠️".to_string(),
                critical: "❌".to_string(),
            },
            load: SeverityGlyphs {
                healthy: "🟢".to_string(),
                warning: "🟠".to_string(),
                critical: "🔴".to_string(),
            },
            colors: Colors::default(),
            bar: BarStyle::default(),
            loading_glyph: "⏳".to_string(),
            host_glyph: "🖥️".to_string(),
            error_glyph: "❌".to_string(),
            unavailable_glyph: "⚠️".to_string(),
        }
    }
}

impl Theme {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file '{}': {}", path.display(), e))?;
        Self::from_json(&raw)
            .map_err(|e| format!("Invalid theme file '{}': {}", path.display(), e))
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
