//! Engine configuration.
//!
//! One explicitly-passed struct — no module-level globals — so pipelines for
//! different instruments or accounts can run concurrently with different
//! configurations. Configuration anomalies are fatal at startup and surface
//! before any processing begins.

use crate::risk::sizer::RiskConfigError;
use crate::risk::RiskConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full engine configuration with the recognized options and their defaults.
///
/// Deserializable from TOML; every field falls back to its default when
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum pattern strength a signal needs to survive the strength filter.
    pub min_signal_strength: f64,
    /// Whether the recency filter actually drops stale signals. Off by
    /// default — see the recency filter docs.
    pub recency_enabled: bool,
    pub recency_window_hours: i64,
    pub confluence_min_group_size: usize,
    /// Bars in the rolling average used by the volume factor.
    pub volume_lookback: usize,
    pub risk: RiskConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_signal_strength: 0.5,
            recency_enabled: false,
            recency_window_hours: 24,
            confluence_min_group_size: 2,
            volume_lookback: 20,
            risk: RiskConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Risk(#[from] RiskConfigError),

    #[error("min_signal_strength {0} outside [0, 1]")]
    InvalidMinStrength(f64),

    #[error("recency_window_hours {0} must be positive")]
    InvalidRecencyWindow(i64),

    #[error("confluence_min_group_size must be at least 1")]
    InvalidConfluenceGroupSize,
}

impl EngineConfig {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_signal_strength.is_finite()
            || !(0.0..=1.0).contains(&self.min_signal_strength)
        {
            return Err(ConfigError::InvalidMinStrength(self.min_signal_strength));
        }
        if self.recency_window_hours <= 0 {
            return Err(ConfigError::InvalidRecencyWindow(self.recency_window_hours));
        }
        if self.confluence_min_group_size == 0 {
            return Err(ConfigError::InvalidConfluenceGroupSize);
        }
        self.risk.validate()?;
        Ok(())
    }
}
