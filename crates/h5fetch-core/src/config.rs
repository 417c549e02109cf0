//! User configuration (`config.toml`) and the curl settings derived from it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/h5fetch/config.toml`.
///
/// Read by the CLI and handed to [`crate::fetcher::Fetcher`] explicitly; the
/// library never loads it on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Default cache directory when `--cache-path` is not given (None = current directory).
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Total seconds allowed for the metadata probe (HEAD, or its GET fallback).
    pub probe_timeout_secs: u64,
    /// Abort a download whose rate stays below this many bytes/s ...
    pub low_speed_limit_bytes: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Download into `<file>.part` and rename only after the size check passes.
    #[serde(default)]
    pub atomic_download: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            connect_timeout_secs: 15,
            probe_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            atomic_download: false,
        }
    }
}

/// Curl tuning shared by the probe and the downloader.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        FetchConfig::default().curl_options()
    }
}

impl FetchConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("h5fetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert!(cfg.cache_dir.is_none());
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.probe_timeout_secs, 30);
        assert!(!cfg.atomic_download);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.low_speed_limit_bytes, cfg.low_speed_limit_bytes);
        assert_eq!(parsed.atomic_download, cfg.atomic_download);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            cache_dir = "~/datasets"
            connect_timeout_secs = 5
            probe_timeout_secs = 10
            low_speed_limit_bytes = 4096
            low_speed_time_secs = 20
            atomic_download = true
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.cache_dir, Some(PathBuf::from("~/datasets")));
        assert!(cfg.atomic_download);
        let curl = cfg.curl_options();
        assert_eq!(curl.connect_timeout, Duration::from_secs(5));
        assert_eq!(curl.probe_timeout, Duration::from_secs(10));
        assert_eq!(curl.low_speed_limit, 4096);
        assert_eq!(curl.low_speed_time, Duration::from_secs(20));
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let toml = r#"
            connect_timeout_secs = 15
            probe_timeout_secs = 30
            low_speed_limit_bytes = 1024
            low_speed_time_secs = 60
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert!(cfg.cache_dir.is_none());
        assert!(!cfg.atomic_download);
    }
}
