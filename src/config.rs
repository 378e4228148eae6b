use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::system::counters::CounterSources;
use crate::system::process::DEFAULT_MIN_CANDIDATES;

/// Longest allowed wait slice; bounds how long a typed command can sit unread.
pub const MAX_POLL_SLICE_MS: u64 = 250;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sampler: SamplerConfig,
    pub sources: SourcesConfig,
    pub colors: ColorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub poll_slice_ms: u64,
    pub default_sort: String,
    pub top_n: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            poll_slice_ms: 200,
            default_sort: "cpu".to_string(),
            top_n: 10,
        }
    }
}

impl GeneralConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms.max(1))
    }

    pub fn poll_slice(&self) -> Duration {
        let slice = self
            .poll_slice_ms
            .clamp(1, MAX_POLL_SLICE_MS)
            .min(self.refresh_rate_ms.max(1));
        Duration::from_millis(slice)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub provider: String,
    pub min_candidates: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            provider: "sysinfo".to_string(),
            min_candidates: DEFAULT_MIN_CANDIDATES,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub cpu_stat: PathBuf,
    pub meminfo: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let defaults = CounterSources::default();
        SourcesConfig {
            cpu_stat: defaults.cpu_stat,
            meminfo: defaults.meminfo,
        }
    }
}

impl SourcesConfig {
    pub fn counter_sources(&self) -> CounterSources {
        CounterSources {
            cpu_stat: self.cpu_stat.clone(),
            meminfo: self.meminfo.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub critical: String,
    pub elevated: String,
    pub normal: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            critical: "red".to_string(),
            elevated: "yellow".to_string(),
            normal: "green".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Empty disables logging; stdout belongs to the dashboard.
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::new(),
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.poll_slice_ms, 200);
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.general.top_n, 10);
        assert_eq!(config.sampler.provider, "sysinfo");
        assert_eq!(config.sampler.min_candidates, 50);
        assert_eq!(config.sources.cpu_stat, PathBuf::from("/proc/stat"));
        assert_eq!(config.colors.critical, "red");
        assert!(config.logging.file.as_os_str().is_empty());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.top_n, 10);
        assert_eq!(config.sampler.provider, "sysinfo");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 1000
poll_slice_ms = 100
default_sort = "mem"
top_n = 25

[sampler]
provider = "ps"
min_candidates = 80

[sources]
cpu_stat = "/tmp/stat"
meminfo = "/tmp/meminfo"

[colors]
critical = "magenta"

[logging]
file = "/tmp/sysmon.log"
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.poll_slice(), Duration::from_millis(100));
        assert_eq!(config.general.default_sort, "mem");
        assert_eq!(config.general.top_n, 25);
        assert_eq!(config.sampler.provider, "ps");
        assert_eq!(config.sampler.min_candidates, 80);
        assert_eq!(
            config.sources.counter_sources().meminfo,
            PathBuf::from("/tmp/meminfo")
        );
        assert_eq!(config.colors.critical, "magenta");
        assert_eq!(config.colors.normal, "green");
        assert_eq!(config.logging.file, PathBuf::from("/tmp/sysmon.log"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn poll_slice_is_bounded() {
        let mut general = GeneralConfig {
            poll_slice_ms: 5000,
            ..GeneralConfig::default()
        };
        assert_eq!(general.poll_slice(), Duration::from_millis(MAX_POLL_SLICE_MS));
        general.poll_slice_ms = 0;
        assert_eq!(general.poll_slice(), Duration::from_millis(1));
        general.poll_slice_ms = 200;
        general.refresh_rate_ms = 50;
        assert_eq!(general.poll_slice(), Duration::from_millis(50));
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 2000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("sysmon_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 2000);
        let _ = std::fs::remove_file(&temp);
    }
}
