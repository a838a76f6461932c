//! Pattern detection — candlestick geometry over a bounded bar window.
//!
//! Detectors are pure functions: bar history in, pattern events out. They are
//! portfolio-agnostic and stateless — the same window always re-derives the
//! same events. Detection needs at most two bars of lookback.

pub mod doji;
pub mod engulfing;

use crate::domain::Bar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of pattern types.
///
/// New detectors are added as variants so every downstream `match` is checked
/// exhaustively by the compiler — no string comparisons. `AiModel` tags
/// signals injected by an external predictor; no detector ever emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    BullishEngulfing,
    BearishEngulfing,
    Doji,
    AiModel,
}

impl PatternType {
    /// Stable label used in IDs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            PatternType::BullishEngulfing => "bullish_engulfing",
            PatternType::BearishEngulfing => "bearish_engulfing",
            PatternType::Doji => "doji",
            PatternType::AiModel => "ai_model",
        }
    }
}

/// Directional intent of a pattern or signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
            Direction::Neutral => "neutral",
        }
    }
}

/// An immutable market event emitted by a pattern detector.
///
/// Re-derivable from the same window — carries no state beyond what the bars
/// show. Strength is in [0, 1]; the detectors here are binary (1.0 when
/// matched), continuous refinement is the scorer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEvent {
    pub pattern: PatternType,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub strength: f64,
}

/// Trait for pattern detectors.
///
/// # Architecture invariant
/// Detectors must only use data from `bars[0..=index]` and must never
/// reference portfolio or account state.
pub trait PatternDetector: Send + Sync {
    /// Human-readable name (e.g., "engulfing").
    fn name(&self) -> &str;

    /// Minimum window length before this detector can produce output.
    fn min_bars(&self) -> usize;

    /// Evaluate the detector at `index` given the bar history.
    ///
    /// Returns `Some(PatternEvent)` for the bar at `index` if the pattern
    /// matched, `None` otherwise. A window shorter than `min_bars()` yields
    /// `None` — insufficient data is not an error.
    fn detect(&self, bars: &[Bar], index: usize) -> Option<PatternEvent>;
}

/// The standard detector set: engulfing (both directions) and doji.
pub fn default_detectors() -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(engulfing::EngulfingDetector),
        Box::new(doji::DojiDetector::default()),
    ]
}

/// Run every detector over every index of the window.
///
/// Events come out ordered by bar index, then by detector order.
pub fn detect_window(bars: &[Bar], detectors: &[Box<dyn PatternDetector>]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for index in 0..bars.len() {
        for detector in detectors {
            if index + 1 < detector.min_bars() {
                continue;
            }
            if let Some(event) = detector.detect(bars, index) {
                events.push(event);
            }
        }
    }
    events
}

// Re-export concrete detector types.
pub use doji::DojiDetector;
pub use engulfing::EngulfingDetector;
