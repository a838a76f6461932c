//! Doji — indecision candle with a body that is tiny relative to its range.

use crate::domain::Bar;

use super::{Direction, PatternDetector, PatternEvent, PatternType};

/// Single-bar doji detector.
///
/// Matches when `|close − open| < body_ratio × (high − low)`. A zero-range
/// bar (high == low) is defined as no-pattern — the ratio test is skipped
/// rather than dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct DojiDetector {
    pub body_ratio: f64,
}

impl Default for DojiDetector {
    fn default() -> Self {
        Self { body_ratio: 0.10 }
    }
}

impl PatternDetector for DojiDetector {
    fn name(&self) -> &str {
        "doji"
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn detect(&self, bars: &[Bar], index: usize) -> Option<PatternEvent> {
        let bar = bars.get(index)?;
        let range = bar.range();

        if range <= 0.0 {
            return None;
        }
        if bar.body() >= self.body_ratio * range {
            return None;
        }

        Some(PatternEvent {
            pattern: PatternType::Doji,
            timestamp: bar.timestamp,
            direction: Direction::Neutral,
            strength: 1.0,
        })
    }
}
