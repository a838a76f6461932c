//! Engulfing pattern — two-candle reversal where the later body fully
//! contains the prior body.
//!
//! Fires Bullish when a bullish candle engulfs a preceding bearish one.
//! Fires Bearish on the mirror image.

use crate::domain::Bar;

use super::{Direction, PatternDetector, PatternEvent, PatternType};

/// Two-bar engulfing detector (bullish and bearish).
///
/// Bullish: previous bar closes below its open AND current bar closes above
/// its open AND the current body strictly contains the previous body
/// (`curr.open < prev.close && curr.close > prev.open`). Bearish is the
/// mirror. Strength is binary — 1.0 on match; continuous refinement happens
/// in the scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngulfingDetector;

impl PatternDetector for EngulfingDetector {
    fn name(&self) -> &str {
        "engulfing"
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn detect(&self, bars: &[Bar], index: usize) -> Option<PatternEvent> {
        if index < 1 {
            return None;
        }
        let prev = bars.get(index - 1)?;
        let curr = bars.get(index)?;

        // Bullish engulfing: bearish candle swallowed by a bullish one.
        if prev.is_bearish()
            && curr.is_bullish()
            && curr.open < prev.close
            && curr.close > prev.open
        {
            return Some(PatternEvent {
                pattern: PatternType::BullishEngulfing,
                timestamp: curr.timestamp,
                direction: Direction::Bullish,
                strength: 1.0,
            });
        }

        // Bearish engulfing: bullish candle swallowed by a bearish one.
        if prev.is_bullish()
            && curr.is_bearish()
            && curr.open > prev.close
            && curr.close < prev.open
        {
            return Some(PatternEvent {
                pattern: PatternType::BearishEngulfing,
                timestamp: curr.timestamp,
                direction: Direction::Bearish,
                strength: 1.0,
            });
        }

        None
    }
}
