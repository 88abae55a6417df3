use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "kairos.toml";

/// Top-level Kairos configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KairosConfig {
    /// Calendar identity settings.
    #[serde(default)]
    pub calendar: CalendarToml,

    /// Search settings.
    #[serde(default)]
    pub search: SearchToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    #[serde(default = "default_system")]
    pub system: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// 1 = Sunday ... 7 = Saturday. Defaults to the system's convention.
    #[serde(default)]
    pub first_weekday: Option<i32>,
    #[serde(default)]
    pub minimum_days_in_first_week: Option<u8>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            system: default_system(),
            time_zone: default_time_zone(),
            first_weekday: None,
            minimum_days_in_first_week: None,
            locale: None,
        }
    }
}

fn default_system() -> String {
    "gregorian".to_string()
}
fn default_time_zone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_matching_policy")]
    pub matching_policy: String,
    #[serde(default = "default_repeated_time_policy")]
    pub repeated_time_policy: String,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            direction: default_direction(),
            matching_policy: default_matching_policy(),
            repeated_time_policy: default_repeated_time_policy(),
            max_iterations: default_max_iterations(),
            limit: default_limit(),
        }
    }
}

fn default_direction() -> String {
    "forward".to_string()
}
fn default_matching_policy() -> String {
    "next-time".to_string()
}
fn default_repeated_time_policy() -> String {
    "first".to_string()
}
fn default_max_iterations() -> usize {
    100
}
fn default_limit() -> usize {
    10
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// read if present and the built-in defaults are used otherwise.
pub fn load(path: Option<&Path>) -> Result<KairosConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                debug!("no configuration file, using defaults");
                return Ok(KairosConfig::default());
            }
            default
        }
    };
    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: KairosConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
