//! Risk sizer — sequential gates, tier multiplier, capped allocation.

use crate::domain::SignalId;
use crate::signals::Signal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use super::tiers::RiskTierTable;

/// Why a signal was rejected by the sizer.
///
/// Rejections are expected business outcomes, not faults — they are carried
/// in the `SizingResult`, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InstrumentDisabled,
    ConfidenceBelowMinimum,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InstrumentDisabled => write!(f, "instrument disabled"),
            RejectionReason::ConfidenceBelowMinimum => write!(f, "confidence below minimum"),
        }
    }
}

/// Sizing decision for one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub signal_id: SignalId,
    /// Percent of account equity to risk. Always ≤ the configured cap.
    pub risk_percent: f64,
    /// `account_balance × risk_percent / 100`.
    pub risk_amount: f64,
    pub multiplier: f64,
    pub accepted: bool,
    pub rejection_reason: Option<RejectionReason>,
}

/// Risk sizing configuration. Percentages here are operator-facing 0–100
/// numbers; the sizer converts signal confidence (a 0–1 fraction) once at
/// its boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub base_risk_percent: f64,
    pub max_risk_per_trade_percent: f64,
    pub min_confidence_percent: f64,
    pub risk_tiers: RiskTierTable,
    /// Instrument enablement. Unknown instruments default to disabled.
    pub enabled_instruments: HashMap<String, bool>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            base_risk_percent: 1.0,
            max_risk_per_trade_percent: 5.0,
            min_confidence_percent: 75.0,
            risk_tiers: RiskTierTable::standard(),
            enabled_instruments: HashMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RiskConfigError {
    #[error("base_risk_percent {0} must be finite and positive")]
    InvalidBaseRisk(f64),

    #[error("max_risk_per_trade_percent {0} must be finite and non-negative")]
    InvalidMaxRisk(f64),

    #[error("min_confidence_percent {0} outside [0, 100]")]
    InvalidMinConfidence(f64),
}

impl RiskConfig {
    pub fn validate(&self) -> Result<(), RiskConfigError> {
        if !self.base_risk_percent.is_finite() || self.base_risk_percent <= 0.0 {
            return Err(RiskConfigError::InvalidBaseRisk(self.base_risk_percent));
        }
        if !self.max_risk_per_trade_percent.is_finite() || self.max_risk_per_trade_percent < 0.0 {
            return Err(RiskConfigError::InvalidMaxRisk(self.max_risk_per_trade_percent));
        }
        if !self.min_confidence_percent.is_finite()
            || !(0.0..=100.0).contains(&self.min_confidence_percent)
        {
            return Err(RiskConfigError::InvalidMinConfidence(self.min_confidence_percent));
        }
        Ok(())
    }
}

/// Sizes accepted signals into bounded risk allocations.
///
/// # Responsibilities
/// - Gate on instrument enablement, then minimum confidence (hard rejects)
/// - Map confidence to a multiplier via the ordered tier table
/// - Cap `base × multiplier` at the per-trade maximum, after multiplication
///
/// # Non-Responsibilities
/// - No lot-size/pip-value conversion (needs instrument metadata the engine
///   does not own)
/// - No position or account state — each decision is independent
#[derive(Debug, Clone)]
pub struct RiskSizer {
    config: RiskConfig,
}

impl RiskSizer {
    pub fn new(config: RiskConfig) -> Result<Self, RiskConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    fn reject(signal: &Signal, reason: RejectionReason) -> SizingResult {
        SizingResult {
            signal_id: signal.id.clone(),
            risk_percent: 0.0,
            risk_amount: 0.0,
            multiplier: 0.0,
            accepted: false,
            rejection_reason: Some(reason),
        }
    }

    /// Compute the sizing decision for one signal.
    pub fn size(&self, signal: &Signal, account_balance: f64) -> SizingResult {
        let enabled = self
            .config
            .enabled_instruments
            .get(&signal.symbol)
            .copied()
            .unwrap_or(false);
        if !enabled {
            return Self::reject(signal, RejectionReason::InstrumentDisabled);
        }

        let confidence_percent = signal.confidence * 100.0;
        if confidence_percent < self.config.min_confidence_percent {
            return Self::reject(signal, RejectionReason::ConfidenceBelowMinimum);
        }

        let multiplier = self.config.risk_tiers.multiplier_for(confidence_percent);
        let calculated_risk = self.config.base_risk_percent * multiplier;
        let risk_percent = calculated_risk.min(self.config.max_risk_per_trade_percent);
        let risk_amount = account_balance * risk_percent / 100.0;

        SizingResult {
            signal_id: signal.id.clone(),
            risk_percent,
            risk_amount,
            multiplier,
            accepted: true,
            rejection_reason: None,
        }
    }
}
