//! Signal scorer — converts pattern events into confidence-scored signals.
//!
//! Confidence combines the detector's strength with a volume expansion
//! factor: a pattern printed on heavy volume relative to its recent average
//! is more trustworthy than one printed into a dead tape.

use crate::domain::{Bar, SignalId};
use crate::patterns::PatternEvent;
use chrono::{DateTime, Utc};

use super::Signal;

/// Find the index of the bar nearest to `timestamp`.
///
/// Bars must be ordered by timestamp. Exact matches win; otherwise the
/// neighbor with the smaller timestamp distance is chosen, the earlier bar
/// on an exact tie. Returns `None` for an empty slice.
pub fn nearest_bar_index(bars: &[Bar], timestamp: DateTime<Utc>) -> Option<usize> {
    if bars.is_empty() {
        return None;
    }
    match bars.binary_search_by_key(&timestamp, |b| b.timestamp) {
        Ok(index) => Some(index),
        Err(insert_at) => {
            if insert_at == 0 {
                return Some(0);
            }
            if insert_at == bars.len() {
                return Some(bars.len() - 1);
            }
            let before = timestamp - bars[insert_at - 1].timestamp;
            let after = bars[insert_at].timestamp - timestamp;
            if after < before {
                Some(insert_at)
            } else {
                Some(insert_at - 1)
            }
        }
    }
}

/// Scores pattern events against their local bar context.
///
/// `confidence = clamp(min(strength, 1.0) × volume_factor, 0, 1)` where
/// `volume_factor = min(volume / rolling_avg_volume, 2.0)` over the
/// `volume_lookback` bars preceding the event bar. A missing or non-positive
/// average degrades to the neutral factor 1.0 — never an error, never
/// infinity.
#[derive(Debug, Clone, Copy)]
pub struct SignalScorer {
    pub volume_lookback: usize,
}

impl Default for SignalScorer {
    fn default() -> Self {
        Self { volume_lookback: 20 }
    }
}

impl SignalScorer {
    pub fn new(volume_lookback: usize) -> Self {
        Self { volume_lookback }
    }

    /// Rolling average volume over the `volume_lookback` bars before `index`.
    ///
    /// Returns `None` when the history is too short.
    fn rolling_avg_volume(&self, bars: &[Bar], index: usize) -> Option<f64> {
        if self.volume_lookback == 0 || index < self.volume_lookback {
            return None;
        }
        let window = &bars[index - self.volume_lookback..index];
        let sum: f64 = window.iter().map(|b| b.volume).sum();
        Some(sum / self.volume_lookback as f64)
    }

    fn volume_factor(&self, bars: &[Bar], index: usize) -> f64 {
        match self.rolling_avg_volume(bars, index) {
            Some(avg) if avg > 0.0 && avg.is_finite() => {
                (bars[index].volume / avg).min(2.0)
            }
            _ => 1.0,
        }
    }

    /// Score a pattern event into a signal.
    ///
    /// The bar context is located by the event's timestamp (nearest bar when
    /// no exact match exists). Returns `None` only when `bars` is empty.
    pub fn score(&self, event: &PatternEvent, bars: &[Bar]) -> Option<Signal> {
        let index = nearest_bar_index(bars, event.timestamp)?;
        let bar = &bars[index];

        let base_strength = event.strength.min(1.0);
        let confidence = (base_strength * self.volume_factor(bars, index)).clamp(0.0, 1.0);

        let id = SignalId::derive(
            &bar.symbol,
            event.timestamp,
            event.pattern.label(),
            event.direction.label(),
        );

        Some(Signal {
            id,
            symbol: bar.symbol.clone(),
            pattern: event.pattern,
            timestamp: event.timestamp,
            direction: event.direction,
            strength: event.strength,
            price: bar.close,
            confidence,
            confluence_count: None,
        })
    }
}
