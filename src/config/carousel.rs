use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// Caller-supplied carousel options (`[carousel]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Show the manual next/finish control
    pub advance_button: bool,
    /// Advance pages on a timer
    pub automatic: bool,
    /// Progress dots are jump targets
    pub clickable: bool,
    /// Button label on the last page when a finish callback is installed
    pub finish_text: String,
    /// Auto-advance period, also the cooldown after a dot click
    pub interval_ms: u64,
    pub dot_radius: u16,
    /// Columns between progress dots
    pub dot_spacing: u16,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            advance_button: false,
            automatic: false,
            clickable: false,
            finish_text: "finish".to_string(),
            interval_ms: 1000,
            dot_radius: 1,
            dot_spacing: 1,
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(CarouselError::InvalidInterval);
        }
        if self.dot_radius == 0 {
            return Err(CarouselError::InvalidDotRadius);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert!(!config.advance_button);
        assert!(!config.automatic);
        assert!(!config.clickable);
        assert_eq!(config.finish_text, "finish");
        assert_eq!(config.interval(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CarouselConfig = toml::from_str("automatic = true\ninterval_ms = 500").unwrap();
        assert!(config.automatic);
        assert_eq!(config.interval_ms, 500);
        assert_eq!(config.finish_text, "finish");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = CarouselConfig {
            interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CarouselError::InvalidInterval)));
    }

    #[test]
    fn test_zero_radius_rejected() {
        let config = CarouselConfig {
            dot_radius: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CarouselError::InvalidDotRadius)));
    }
}
