//! Risk tier table — the confidence → multiplier step function.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One step of the risk curve: at or above `min_confidence` (a percentage),
/// apply `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTier {
    pub min_confidence: f64,
    pub multiplier: f64,
}

#[derive(Debug, Error)]
pub enum RiskTierError {
    #[error("risk tiers must be ordered by strictly descending min_confidence: {previous} then {current}")]
    UnorderedThresholds { previous: f64, current: f64 },

    #[error("risk tier min_confidence {0} outside [0, 100]")]
    ThresholdOutOfRange(f64),

    #[error("risk tier multiplier {0} must be finite and positive")]
    InvalidMultiplier(f64),
}

/// Ordered, validated tier table.
///
/// Lookup checks the highest threshold first; confidence below every named
/// threshold gets the default 1.0× multiplier. Validation is fatal at
/// construction — a non-monotonic table would silently pick a wrong tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskTier>", into = "Vec<RiskTier>")]
pub struct RiskTierTable {
    tiers: Vec<RiskTier>,
}

impl RiskTierTable {
    /// The stock curve: 90% → 4.0×, 85% → 2.5×, 80% → 1.5×.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                RiskTier { min_confidence: 90.0, multiplier: 4.0 },
                RiskTier { min_confidence: 85.0, multiplier: 2.5 },
                RiskTier { min_confidence: 80.0, multiplier: 1.5 },
            ],
        }
    }

    /// Validate and build a table. Tiers must come ordered highest threshold
    /// first, strictly descending.
    pub fn new(tiers: Vec<RiskTier>) -> Result<Self, RiskTierError> {
        let mut previous: Option<f64> = None;
        for tier in &tiers {
            if !tier.min_confidence.is_finite()
                || !(0.0..=100.0).contains(&tier.min_confidence)
            {
                return Err(RiskTierError::ThresholdOutOfRange(tier.min_confidence));
            }
            if !tier.multiplier.is_finite() || tier.multiplier <= 0.0 {
                return Err(RiskTierError::InvalidMultiplier(tier.multiplier));
            }
            if let Some(prev) = previous {
                if tier.min_confidence >= prev {
                    return Err(RiskTierError::UnorderedThresholds {
                        previous: prev,
                        current: tier.min_confidence,
                    });
                }
            }
            previous = Some(tier.min_confidence);
        }
        Ok(Self { tiers })
    }

    /// Multiplier for a confidence percentage. Thresholds are inclusive:
    /// exactly 90.0 hits the 90% tier.
    pub fn multiplier_for(&self, confidence_percent: f64) -> f64 {
        for tier in &self.tiers {
            if confidence_percent >= tier.min_confidence {
                return tier.multiplier;
            }
        }
        1.0
    }

    pub fn tiers(&self) -> &[RiskTier] {
        &self.tiers
    }
}

impl TryFrom<Vec<RiskTier>> for RiskTierTable {
    type Error = RiskTierError;

    fn try_from(tiers: Vec<RiskTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<RiskTierTable> for Vec<RiskTier> {
    fn from(table: RiskTierTable) -> Self {
        table.tiers
    }
}
