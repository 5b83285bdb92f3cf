//! `elemental settings` and `elemental config`

use anyhow::{Context, Result};
use elemental_store::{ProfileBook, SnapshotStore};

use super::{ConfigCommands, SettingsCommands};
use crate::app::AppConfig;

/// Show or update the stored run settings.
pub async fn run_settings<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    cmd: SettingsCommands,
) -> Result<()> {
    match cmd {
        SettingsCommands::Show => {
            let s = book.snapshot().settings;
            println!("Distribution mode:        {}", s.distribution_mode);
            println!("Concentration threshold:  {:.1}%", s.concentration_threshold);
            Ok(())
        }
        SettingsCommands::Set { threshold, mode } => {
            if threshold.is_none() && mode.is_none() {
                println!("Nothing to change. Pass --threshold and/or --mode.");
                return Ok(());
            }
            let mut next = book.snapshot().settings;
            if let Some(threshold) = threshold {
                next = next.with_threshold(threshold);
            }
            if let Some(mode) = mode {
                next = next.with_mode(mode);
            }
            book.set_settings(next)
                .await
                .context("Failed to save settings")?;
            println!(
                "✅ Settings saved (mode {}, threshold {:.1}%)",
                next.distribution_mode, next.concentration_threshold
            );
            Ok(())
        }
    }
}

/// Print or write the effective configuration.
pub fn run_config(cmd: ConfigCommands, config: &AppConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{rendered}");
            println!("# database path: {}", config.db_path().display());
            Ok(())
        }
        ConfigCommands::Init { path } => {
            config.save(&path)?;
            println!("✅ Wrote {}", path.display());
            Ok(())
        }
    }
}
