//! Administrator settings that influence a matching run.

use serde::{Deserialize, Serialize};

use crate::matcher::DistributionMode;

/// Default percentage above which a distribution counts as concentrated.
pub const DEFAULT_CONCENTRATION_THRESHOLD: f64 = 10.0;

/// Run-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Concentration warning threshold in percent (1–100)
    #[serde(default = "default_threshold")]
    pub concentration_threshold: f64,
    /// Selected matching policy
    #[serde(default)]
    pub distribution_mode: DistributionMode,
}

fn default_threshold() -> f64 {
    DEFAULT_CONCENTRATION_THRESHOLD
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            concentration_threshold: DEFAULT_CONCENTRATION_THRESHOLD,
            distribution_mode: DistributionMode::default(),
        }
    }
}

impl AppSettings {
    /// Set the threshold, clamped to 1–100. Non-finite input restores the default.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.concentration_threshold = if threshold.is_finite() {
            threshold.clamp(1.0, 100.0)
        } else {
            DEFAULT_CONCENTRATION_THRESHOLD
        };
        self
    }

    /// Set the distribution mode.
    pub fn with_mode(mut self, mode: DistributionMode) -> Self {
        self.distribution_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_clamped() {
        let s = AppSettings::default();
        assert_eq!(s.concentration_threshold, 10.0);
        assert_eq!(s.with_threshold(0.0).concentration_threshold, 1.0);
        assert_eq!(s.with_threshold(250.0).concentration_threshold, 100.0);
        assert_eq!(s.with_threshold(f64::NAN).concentration_threshold, 10.0);
        assert_eq!(s.with_threshold(35.0).concentration_threshold, 35.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, AppSettings::default());
        let wide: AppSettings = serde_json::from_str(r#"{"distribution_mode":"wide"}"#).unwrap();
        assert_eq!(wide.distribution_mode, DistributionMode::Wide);
    }
}
