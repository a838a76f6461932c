//! OHLCV bar — one observation of an instrument over a fixed interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol on a single time interval.
///
/// Bars are immutable once produced and ordered by timestamp within one
/// instrument's stream. Duplicate timestamps are a data defect; the engine
/// skips the offending bar rather than aborting the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// True when any OHLCV field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Sanity check: high/low must bracket open and close, prices positive,
    /// volume non-negative.
    ///
    /// A zero-range bar (high == low) is sane — the doji check is defined as
    /// false for it, but the bar itself still carries a valid close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }

    /// High-to-low range.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Absolute body size (open-to-close distance).
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Close above open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Close below open.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
