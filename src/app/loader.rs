//! Layered configuration for the `elemental` binary
//!
//! Later layers win: built-in defaults, `config/default.toml`,
//! `config/<ELEMENTAL_ENV>.toml`, `config/local.toml`, then `ELEMENTAL_*`
//! variables such as `ELEMENTAL_MATCHING__DEFAULT_MODE=wide`.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

/// Built-in defaults shipped inside the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

const ENV_PREFIX: &str = "ELEMENTAL";
const DEFAULT_PROFILE: &str = "development";

/// Read every configuration layer and deserialize the result.
pub fn load_config() -> Result<AppConfig> {
    let profile =
        std::env::var(format!("{ENV_PREFIX}_ENV")).unwrap_or_else(|_| DEFAULT_PROFILE.into());

    layers(&profile)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read configuration layers")?
        .try_deserialize()
        .with_context(|| format!("Invalid configuration for profile '{profile}'"))
}

/// File layers for a profile, without the environment overlay.
fn layers(profile: &str) -> ConfigBuilder<DefaultState> {
    Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{profile}")).required(false))
        .add_source(File::with_name("config/local").required(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_core::DistributionMode;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.database, "elemental.db");
        assert!(config.data_dir.is_none());
        assert_eq!(config.matching.default_mode, DistributionMode::Normal);
        assert_eq!(config.matching.concentration_threshold, 10.0);
    }

    #[test]
    fn test_missing_profile_files_are_optional() {
        let config: AppConfig = layers("no-such-profile")
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert!(!config.database.is_empty());
    }
}
