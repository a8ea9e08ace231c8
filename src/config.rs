use crate::error::BotError;
use crate::services::system::{CollectorSettings, Thresholds};
use crate::utils::theme::Theme;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub owner_id: Option<u64>,
    pub collector: CollectorSettings,
    pub thresholds: Thresholds,
    pub theme: Theme,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get("TOKEN").ok_or_else(|| BotError::Config("TOKEN not configured".into()))?;
        let owner_id = get("CLIENT_ID").map(|v| parse("CLIENT_ID", &v)).transpose()?;

        let defaults = CollectorSettings::default();
        let collector = CollectorSettings {
            disk_path: get("VPSLOAD_DISK_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.disk_path),
            query_timeout: get("VPSLOAD_TIMEOUT_MS")
                .map(|v| parse("VPSLOAD_TIMEOUT_MS", &v).map(Duration::from_millis))
                .transpose()?
                .unwrap_or(defaults.query_timeout),
            cpu_sample: get("VPSLOAD_CPU_SAMPLE_MS")
                .map(|v| parse("VPSLOAD_CPU_SAMPLE_MS", &v).map(Duration::from_millis))
                .transpose()?
                .unwrap_or(defaults.cpu_sample),
        };
        if collector.query_timeout.is_zero() {
            return Err(BotError::Config("VPSLOAD_TIMEOUT_MS must be above 0".into()));
        }
        let sample = collector.cpu_sample.max(MINIMUM_CPU_UPDATE_INTERVAL);
        if sample >= collector.query_timeout {
            return Err(BotError::Config(format!(
                "CPU sample window {:?} does not fit in VPSLOAD_TIMEOUT_MS ({:?})",
                sample, collector.query_timeout
            )));
        }

        let mut thresholds = Thresholds::default();
        if let Some(v) = get("VPSLOAD_WARN_PERCENT") {
            thresholds.warning_percent = percent("VPSLOAD_WARN_PERCENT", &v)?;
        }
        if let Some(v) = get("VPSLOAD_CRIT_PERCENT") {
            thresholds.critical_percent = percent("VPSLOAD_CRIT_PERCENT", &v)?;
        }
        if thresholds.warning_percent > thresholds.critical_percent {
            return Err(BotError::Config(format!(
                "warning threshold {} is above critical threshold {}",
                thresholds.warning_percent, thresholds.critical_percent
            )));
        }

        let theme = match get("VPSLOAD_THEME") {
            Some(path) => Theme::from_file(Path::new(&path)).map_err(BotError::Config)?,
            None => Theme::default(),
        };

        Ok(Self {
            token,
            owner_id,
            collector,
            thresholds,
            theme,
        })
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, BotError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| BotError::Config(format!("{} has invalid value '{}': {}", key, value, e)))
}

/// A threshold percentage: finite and within `0..=100`.
fn percent(key: &str, value: &str) -> Result<f64, BotError> {
    let percent: f64 = parse(key, value)?;
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(BotError::Config(format!(
            "{} must be a percentage between 0 and 100, got '{}'",
            key, value
        )));
    }
    Ok(percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, BotError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("TOKEN", "abc")]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.owner_id, None);
        assert_eq!(config.collector, CollectorSettings::default());
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn token_is_required() {
        assert!(matches!(config(&[]), Err(BotError::Config(_))));
        assert!(matches!(config(&[("TOKEN", "  ")]), Err(BotError::Config(_))));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[
            ("TOKEN", "abc"),
            ("CLIENT_ID", "1234"),
            ("VPSLOAD_DISK_PATH", "/srv"),
            ("VPSLOAD_TIMEOUT_MS", "1500"),
            ("VPSLOAD_CPU_SAMPLE_MS", "400"),
            ("VPSLOAD_WARN_PERCENT", "60"),
            ("VPSLOAD_CRIT_PERCENT", "85.5"),
        ])
        .unwrap();
        assert_eq!(config.owner_id, Some(1234));
        assert_eq!(config.collector.disk_path, PathBuf::from("/srv"));
        assert_eq!(config.collector.query_timeout, Duration::from_millis(1500));
        assert_eq!(config.collector.cpu_sample, Duration::from_millis(400));
        assert_eq!(config.thresholds.warning_percent, 60.0);
        assert_eq!(config.thresholds.critical_percent, 85.5);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = config(&[("TOKEN", "abc"), ("VPSLOAD_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("VPSLOAD_TIMEOUT_MS"));
        assert!(config(&[("TOKEN", "abc"), ("VPSLOAD_TIMEOUT_MS", "0")]).is_err());
        assert!(config(&[("TOKEN", "abc"), ("CLIENT_ID", "me")]).is_err());
        assert!(
            config(&[
                ("TOKEN", "abc"),
                ("VPSLOAD_WARN_PERCENT", "95"),
                ("VPSLOAD_CRIT_PERCENT", "90"),
            ])
            .is_err()
        );
        assert!(config(&[("TOKEN", "abc"), ("VPSLOAD_THEME", "/nonexistent.json")]).is_err());
    }

    #[test]
    fn thresholds_must_be_real_percentages() {
        for bad in ["NaN", "inf", "-inf", "-1", "100.5", "250"] {
            for key in ["VPSLOAD_WARN_PERCENT", "VPSLOAD_CRIT_PERCENT"] {
                let result = config(&[("TOKEN", "abc"), (key, bad)]);
                assert!(
                    matches!(result, Err(BotError::Config(_))),
                    "{}={} was accepted",
                    key,
                    bad
                );
            }
        }

        let config = config(&[
            ("TOKEN", "abc"),
            ("VPSLOAD_WARN_PERCENT", "0"),
            ("VPSLOAD_CRIT_PERCENT", "100"),
        ])
        .unwrap();
        assert_eq!(config.thresholds.warning_percent, 0.0);
        assert_eq!(config.thresholds.critical_percent, 100.0);
    }

    #[test]
    fn cpu_sample_must_fit_in_timeout() {
        let err = config(&[("TOKEN", "abc"), ("VPSLOAD_CPU_SAMPLE_MS", "6000")]).unwrap_err();
        assert!(err.to_string().contains("VPSLOAD_TIMEOUT_MS"));
        assert!(
            config(&[
                ("TOKEN", "abc"),
                ("VPSLOAD_CPU_SAMPLE_MS", "1000"),
                ("VPSLOAD_TIMEOUT_MS", "1000"),
            ])
            .is_err()
        );

        // The OS minimum applies even when the configured window is shorter.
        let tight_timeout = (MINIMUM_CPU_UPDATE_INTERVAL.as_millis() as u64).to_string();
        assert!(
            config(&[
                ("TOKEN", "abc"),
                ("VPSLOAD_CPU_SAMPLE_MS", "0"),
                ("VPSLOAD_TIMEOUT_MS", tight_timeout.as_str()),
            ])
            .is_err()
        );

        let config = config(&[
            ("TOKEN", "abc"),
            ("VPSLOAD_CPU_SAMPLE_MS", "900"),
            ("VPSLOAD_TIMEOUT_MS", "1000"),
        ])
        .unwrap();
        assert_eq!(config.collector.cpu_sample, Duration::from_millis(900));
    }
}
