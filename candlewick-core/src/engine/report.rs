//! Run report — the engine's complete, structured output for one window.

use crate::filters::DroppedSignal;
use crate::risk::SizingResult;
use crate::signals::Signal;
use serde::Serialize;

/// Result of a full pipeline run over one bar window.
///
/// The engine carries no log facade; everything an operator needs to see —
/// what fired, what was filtered and why, what was rejected by sizing, and
/// which bars were skipped — comes back in this report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineReport {
    /// Accepted signals with their sizing, ordered by `(confidence,
    /// timestamp)` descending.
    pub accepted: Vec<(Signal, SizingResult)>,
    /// Signals that survived the filters but were rejected by a sizing gate.
    pub rejected: Vec<(Signal, SizingResult)>,
    /// Signals removed by the filter pipeline, with stage and verdict.
    pub filtered: Vec<DroppedSignal>,
    /// One entry per skipped bar or dropped external signal.
    pub data_quality_warnings: Vec<String>,
    /// Sane bars processed after hygiene.
    pub bar_count: usize,
    /// Raw pattern events detected.
    pub event_count: usize,
    /// Signals entering the filter pipeline (scored + injected).
    pub signal_count: usize,
}

impl EngineReport {
    /// True when the run produced no actionable output of any kind.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty() && self.filtered.is_empty()
    }
}
