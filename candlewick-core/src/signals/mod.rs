//! Signal records — confidence-scored trading signals.
//!
//! Signals are immutable once created, with one exception: the confluence
//! filter annotates the surviving representative of a qualifying group with
//! `confluence_count`. Everything else describes the market event that
//! produced the signal.

pub mod scorer;

use crate::domain::{SignalId, Symbol};
use crate::patterns::{Direction, PatternType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A confidence-scored trading signal.
///
/// Confidence is canonically a 0–1 fraction everywhere inside the engine;
/// percentages appear only at the configuration boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    pub symbol: Symbol,
    pub pattern: PatternType,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub strength: f64,
    /// Close of the bar at the signal's timestamp (nearest bar if no exact match).
    pub price: f64,
    pub confidence: f64,
    /// Set only by the confluence filter: size of the agreeing group.
    pub confluence_count: Option<usize>,
}

/// A signal injected by an external predictor, bypassing pattern detection.
///
/// Injected signals enter the engine with full strength and confidence and
/// flow through the same filter pipeline as detector-derived signals. When
/// `price` is absent it is resolved from the nearest bar by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSignal {
    pub symbol: Symbol,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub price: Option<f64>,
}

impl ExternalSignal {
    /// Convert into a full-confidence `ai_model` signal at the given price.
    pub fn into_signal(self, price: f64) -> Signal {
        let id = SignalId::derive(
            &self.symbol,
            self.timestamp,
            PatternType::AiModel.label(),
            self.direction.label(),
        );
        Signal {
            id,
            symbol: self.symbol,
            pattern: PatternType::AiModel,
            timestamp: self.timestamp,
            direction: self.direction,
            strength: 1.0,
            price,
            confidence: 1.0,
            confluence_count: None,
        }
    }
}

pub use scorer::SignalScorer;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn signal_serialization_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        let signal = Signal {
            id: SignalId::derive("EURUSD", ts, "doji", "neutral"),
            symbol: "EURUSD".into(),
            pattern: PatternType::Doji,
            timestamp: ts,
            direction: Direction::Neutral,
            strength: 1.0,
            price: 1.0850,
            confidence: 0.85,
            confluence_count: Some(3),
        };
        let json = serde_json::to_string(&signal).unwrap();
        let deser: Signal = serde_json::from_str(&json).unwrap();
        assert_eq!(signal.id, deser.id);
        assert_eq!(signal.pattern, deser.pattern);
        assert_eq!(signal.confidence, deser.confidence);
        assert_eq!(signal.confluence_count, deser.confluence_count);
    }

    #[test]
    fn external_signal_becomes_full_confidence_ai_signal() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        let external = ExternalSignal {
            symbol: "EURUSD".into(),
            timestamp: ts,
            direction: Direction::Bullish,
            price: Some(1.0900),
        };
        let signal = external.clone().into_signal(1.0900);
        assert_eq!(signal.pattern, PatternType::AiModel);
        assert_eq!(signal.confidence, 1.0);
        assert_eq!(signal.strength, 1.0);
        assert_eq!(signal.price, 1.0900);
        assert!(signal.confluence_count.is_none());

        // Same identity fields → same ID.
        let again = external.into_signal(1.0900);
        assert_eq!(signal.id, again.id);
    }
}
