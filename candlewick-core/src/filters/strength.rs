//! Strength filter — keeps signals at or above a minimum pattern strength.

use crate::signals::Signal;
use chrono::{DateTime, Utc};

use super::{DroppedSignal, FilterOutcome, FilterVerdict, SignalFilter};

/// Stateless threshold gate on `Signal::strength`.
#[derive(Debug, Clone, Copy)]
pub struct StrengthFilter {
    pub min_strength: f64,
}

impl StrengthFilter {
    pub fn new(min_strength: f64) -> Self {
        Self { min_strength }
    }
}

impl SignalFilter for StrengthFilter {
    fn name(&self) -> &str {
        "strength_filter"
    }

    fn apply(&self, signals: Vec<Signal>, _as_of: DateTime<Utc>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for signal in signals {
            if signal.strength >= self.min_strength {
                outcome.kept.push(signal);
            } else {
                outcome.dropped.push(DroppedSignal {
                    signal,
                    filter_name: self.name().to_string(),
                    verdict: FilterVerdict::FilteredByStrength,
                });
            }
        }
        outcome
    }
}
