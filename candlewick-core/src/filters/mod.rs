//! Filter pipeline — ordered quality gates between scoring and sizing.
//!
//! Three filters apply in a fixed order (strength → recency → confluence);
//! a signal dropped by one stage never reaches the next. Every drop produces
//! a `DroppedSignal` record so callers can see exactly why a signal
//! disappeared — drops are data, not errors.

pub mod confluence;
pub mod recency;
pub mod strength;

use crate::signals::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a filter evaluating a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterVerdict {
    Passed,
    FilteredByStrength,
    FilteredByRecency,
    /// Group too small — confluence is a hard requirement, not a bonus.
    FilteredByConfluence,
    /// Group qualified, but a higher-confidence member represents it.
    MergedIntoConfluence,
}

impl FilterVerdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Record of a signal removed by a filter stage.
///
/// Kept separate from `Signal` to preserve signal immutability — the record
/// captures which stage dropped the signal and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedSignal {
    pub signal: Signal,
    pub filter_name: String,
    pub verdict: FilterVerdict,
}

/// Result of one filter stage: survivors plus drop records.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<Signal>,
    pub dropped: Vec<DroppedSignal>,
}

/// Trait for filter stages.
///
/// Stages operate on the whole surviving batch because some gates (confluence)
/// are inherently cross-signal. `as_of` is the evaluation instant — always
/// derived from bar timestamps, never the wall clock, so identical windows
/// filter identically.
///
/// # Architecture invariant
/// Filters must not reference portfolio or account state.
pub trait SignalFilter: Send + Sync {
    /// Human-readable name (e.g., "strength_filter").
    fn name(&self) -> &str;

    /// Evaluate the batch, splitting it into survivors and drop records.
    fn apply(&self, signals: Vec<Signal>, as_of: DateTime<Utc>) -> FilterOutcome;
}

/// Ordered filter pipeline.
///
/// Runs each stage over the survivors of the previous one and sorts the
/// final list by `(confidence, timestamp)` descending — higher confidence
/// first, ties broken by more recent timestamp, then by ID for a total
/// deterministic order.
pub struct FilterPipeline {
    stages: Vec<Box<dyn SignalFilter>>,
}

impl FilterPipeline {
    pub fn new(stages: Vec<Box<dyn SignalFilter>>) -> Self {
        Self { stages }
    }

    /// The standard three-stage pipeline in its fixed order.
    pub fn standard(
        min_strength: f64,
        recency_window_hours: i64,
        recency_enabled: bool,
        confluence_min_group_size: usize,
    ) -> Self {
        Self::new(vec![
            Box::new(strength::StrengthFilter::new(min_strength)),
            Box::new(recency::RecencyFilter::new(recency_window_hours, recency_enabled)),
            Box::new(confluence::ConfluenceFilter::new(confluence_min_group_size)),
        ])
    }

    pub fn run(&self, signals: Vec<Signal>, as_of: DateTime<Utc>) -> FilterOutcome {
        let mut kept = signals;
        let mut dropped = Vec::new();

        for stage in &self.stages {
            let outcome = stage.apply(kept, as_of);
            kept = outcome.kept;
            dropped.extend(outcome.dropped);
        }

        kept.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
                .then_with(|| a.id.cmp(&b.id))
        });

        FilterOutcome { kept, dropped }
    }
}

// Re-export concrete filter types.
pub use confluence::ConfluenceFilter;
pub use recency::RecencyFilter;
pub use strength::StrengthFilter;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::SignalId;
    use crate::patterns::{Direction, PatternType};
    use crate::signals::Signal;
    use chrono::{DateTime, TimeZone, Utc};

    pub fn base_ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
    }

    pub fn make_signal(
        tag: &str,
        timestamp: DateTime<Utc>,
        direction: Direction,
        strength: f64,
        confidence: f64,
    ) -> Signal {
        Signal {
            id: SignalId::new(tag),
            symbol: "EURUSD".into(),
            pattern: PatternType::BullishEngulfing,
            timestamp,
            direction,
            strength,
            price: 1.0850,
            confidence,
            confluence_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{base_ts, make_signal};
    use super::*;
    use crate::patterns::Direction;
    use chrono::Duration;

    #[test]
    fn filter_verdict_is_passed() {
        assert!(FilterVerdict::Passed.is_passed());
        assert!(!FilterVerdict::FilteredByStrength.is_passed());
        assert!(!FilterVerdict::MergedIntoConfluence.is_passed());
    }

    #[test]
    fn empty_pipeline_sorts_output() {
        let pipeline = FilterPipeline::new(vec![]);
        let ts = base_ts();
        let signals = vec![
            make_signal("a", ts, Direction::Bullish, 1.0, 0.70),
            make_signal("b", ts + Duration::hours(1), Direction::Bullish, 1.0, 0.90),
            make_signal("c", ts + Duration::hours(2), Direction::Bullish, 1.0, 0.90),
        ];
        let outcome = pipeline.run(signals, ts + Duration::hours(2));
        let order: Vec<&str> = outcome.kept.iter().map(|s| s.id.0.as_str()).collect();
        // 0.90 ties broken by more recent timestamp first.
        assert_eq!(order, vec!["c", "b", "a"]);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn stage_order_is_strength_then_recency_then_confluence() {
        let pipeline = FilterPipeline::standard(0.5, 24, true, 2);
        let ts = base_ts();

        // Weak signal: must be recorded by the strength stage, not later ones.
        let weak = make_signal("weak", ts, Direction::Bullish, 0.2, 0.9);
        // Stale signal: strong enough, but 48h old.
        let stale = make_signal("stale", ts - Duration::hours(48), Direction::Bullish, 1.0, 0.9);
        // Lone survivor: passes strength and recency, fails confluence alone.
        let lone = make_signal("lone", ts, Direction::Bullish, 1.0, 0.9);

        let outcome = pipeline.run(vec![weak, stale, lone], ts);
        assert!(outcome.kept.is_empty());

        let verdicts: Vec<(&str, &FilterVerdict)> = outcome
            .dropped
            .iter()
            .map(|d| (d.signal.id.0.as_str(), &d.verdict))
            .collect();
        assert!(verdicts.contains(&("weak", &FilterVerdict::FilteredByStrength)));
        assert!(verdicts.contains(&("stale", &FilterVerdict::FilteredByRecency)));
        assert!(verdicts.contains(&("lone", &FilterVerdict::FilteredByConfluence)));
    }

    #[test]
    fn dropped_signal_never_reaches_later_stages() {
        // A weak AND stale signal is dropped once, by the strength stage.
        let pipeline = FilterPipeline::standard(0.5, 24, true, 2);
        let ts = base_ts();
        let signal = make_signal("ws", ts - Duration::hours(48), Direction::Bullish, 0.2, 0.9);

        let outcome = pipeline.run(vec![signal], ts);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].verdict, FilterVerdict::FilteredByStrength);
        assert_eq!(outcome.dropped[0].filter_name, "strength_filter");
    }
}
