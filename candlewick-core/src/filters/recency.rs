//! Recency filter — drops signals older than a rolling window.
//!
//! The filter ships disabled by default: the system this engine replaces
//! carried the stage as a no-op, and enabling it silently would change
//! default output. Callers opt in via configuration (`recency_enabled`).

use crate::signals::Signal;
use chrono::{DateTime, Duration, Utc};

use super::{DroppedSignal, FilterOutcome, FilterVerdict, SignalFilter};

/// Staleness gate: keeps signals with `timestamp ≥ as_of − window`.
///
/// `as_of` comes from the caller (the engine derives it from the latest bar
/// timestamp), so the gate is deterministic for a given window.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    pub window_hours: i64,
    pub enabled: bool,
}

impl RecencyFilter {
    pub fn new(window_hours: i64, enabled: bool) -> Self {
        Self { window_hours, enabled }
    }
}

impl SignalFilter for RecencyFilter {
    fn name(&self) -> &str {
        "recency_filter"
    }

    fn apply(&self, signals: Vec<Signal>, as_of: DateTime<Utc>) -> FilterOutcome {
        if !self.enabled {
            return FilterOutcome { kept: signals, dropped: Vec::new() };
        }

        let cutoff = as_of - Duration::hours(self.window_hours);
        let mut outcome = FilterOutcome::default();
        for signal in signals {
            if signal.timestamp >= cutoff {
                outcome.kept.push(signal);
            } else {
                outcome.dropped.push(DroppedSignal {
                    signal,
                    filter_name: self.name().to_string(),
                    verdict: FilterVerdict::FilteredByRecency,
                });
            }
        }
        outcome
    }
}
