//! Signal history — rolling record of sizing decisions for reporting.
//!
//! The history is append-only and pruned by age on every update: entries
//! older than the retention window (7 days by default) relative to the
//! newest recorded signal are dropped. It feeds downstream reporting only —
//! nothing in the pipeline reads it back.

use crate::engine::report::EngineReport;
use crate::risk::SizingResult;
use crate::signals::Signal;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// One recorded sizing decision.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub signal: Signal,
    pub sizing: SizingResult,
}

/// Age-pruned ring buffer of sizing decisions.
///
/// Ages are measured against the newest signal timestamp seen, not the wall
/// clock, so replaying the same runs reproduces the same history.
#[derive(Debug)]
pub struct SignalHistory {
    retention: Duration,
    newest: Option<DateTime<Utc>>,
    entries: VecDeque<HistoryEntry>,
}

impl Default for SignalHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHistory {
    /// Seven-day retention.
    pub fn new() -> Self {
        Self::with_retention(Duration::days(7))
    }

    pub fn with_retention(retention: Duration) -> Self {
        Self {
            retention,
            newest: None,
            entries: VecDeque::new(),
        }
    }

    /// Append one decision, then prune anything past the retention window.
    pub fn record(&mut self, signal: Signal, sizing: SizingResult) {
        self.newest = Some(match self.newest {
            Some(newest) => newest.max(signal.timestamp),
            None => signal.timestamp,
        });
        self.entries.push_back(HistoryEntry { signal, sizing });
        self.prune();
    }

    /// Record every sized decision from a run (accepted and rejected).
    pub fn record_run(&mut self, report: &EngineReport) {
        for (signal, sizing) in report.accepted.iter().chain(report.rejected.iter()) {
            self.record(signal.clone(), sizing.clone());
        }
    }

    fn prune(&mut self) {
        if let Some(newest) = self.newest {
            let cutoff = newest - self.retention;
            self.entries.retain(|e| e.signal.timestamp >= cutoff);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

/// Single-writer handle for the history.
///
/// Multiple instrument pipelines may finish concurrently; appends go through
/// one mutex so the buffer only ever has one writer at a time.
#[derive(Debug, Clone, Default)]
pub struct SharedSignalHistory {
    inner: Arc<Mutex<SignalHistory>>,
}

impl SharedSignalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&self, report: &EngineReport) {
        let mut history = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        history.record_run(report);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the current entries out for reporting.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
