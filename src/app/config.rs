//! Application configuration types

use anyhow::{Context, Result};
use elemental_core::{AppSettings, DistributionMode, DEFAULT_CONCENTRATION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the database (defaults to `~/.elemental`)
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub matching: MatchingConfig,
}

fn default_database() -> String {
    "elemental.db".to_string()
}

impl AppConfig {
    /// Resolved database path.
    pub fn db_path(&self) -> PathBuf {
        let dir = match &self.data_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => elemental_store::default_data_dir(),
        };
        dir.join(&self.database)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database: default_database(),
            matching: MatchingConfig::default(),
        }
    }
}

/// Matching defaults applied to a fresh database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub default_mode: DistributionMode,
    #[serde(default = "default_threshold")]
    pub concentration_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_CONCENTRATION_THRESHOLD
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_mode: DistributionMode::default(),
            concentration_threshold: default_threshold(),
        }
    }
}

impl MatchingConfig {
    /// Settings for a new database; the threshold is clamped to 1–100.
    pub fn to_settings(&self) -> AppSettings {
        AppSettings::default()
            .with_mode(self.default_mode)
            .with_threshold(self.concentration_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_uses_data_dir() {
        let config = AppConfig {
            data_dir: Some("/tmp/elemental-test".into()),
            ..Default::default()
        };
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/elemental-test/elemental.db")
        );

        let blank = AppConfig {
            data_dir: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.db_path().ends_with(".elemental/elemental.db"));
    }

    #[test]
    fn test_matching_settings_clamped() {
        let matching = MatchingConfig {
            default_mode: DistributionMode::Wide,
            concentration_threshold: 400.0,
        };
        let settings = matching.to_settings();
        assert_eq!(settings.distribution_mode, DistributionMode::Wide);
        assert_eq!(settings.concentration_threshold, 100.0);
    }

    #[test]
    fn test_save_writes_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("local.toml");
        AppConfig::default().save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("database = \"elemental.db\""));
        assert!(written.contains("[matching]"));
    }
}
