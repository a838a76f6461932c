//! Pipeline orchestration — one bar window in, one report out.
//!
//! Data flows one way: bar window → pattern detection → signal scoring →
//! filter pipeline → risk sizing. Every operation is pure and synchronous;
//! a run completes in time proportional to the window size and holds no
//! mutable shared state, so independent instruments can run concurrently.

use crate::domain::Bar;
use crate::filters::FilterPipeline;
use crate::patterns::{default_detectors, detect_window, PatternDetector};
use crate::risk::RiskSizer;
use crate::signals::scorer::{nearest_bar_index, SignalScorer};
use crate::signals::{ExternalSignal, Signal};
use chrono::{DateTime, Utc};
use rayon::prelude::*;

use super::config::{ConfigError, EngineConfig};
use super::report::EngineReport;

/// The assembled signal & risk engine.
///
/// Construction validates the configuration; a malformed risk-tier table or
/// out-of-range threshold fails here, before any bar is processed.
pub struct Engine {
    config: EngineConfig,
    detectors: Vec<Box<dyn PatternDetector>>,
    scorer: SignalScorer,
    filters: FilterPipeline,
    sizer: RiskSizer,
}

impl Engine {
    /// Build an engine with the standard detector set.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_detectors(config, default_detectors())
    }

    /// Build an engine with a custom detector set.
    pub fn with_detectors(
        config: EngineConfig,
        detectors: Vec<Box<dyn PatternDetector>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scorer = SignalScorer::new(config.volume_lookback);
        let filters = FilterPipeline::standard(
            config.min_signal_strength,
            config.recency_window_hours,
            config.recency_enabled,
            config.confluence_min_group_size,
        );
        let sizer = RiskSizer::new(config.risk.clone())?;
        Ok(Self {
            config,
            detectors,
            scorer,
            filters,
            sizer,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over one instrument's bar window.
    pub fn run(&self, bars: &[Bar], account_balance: f64) -> EngineReport {
        self.run_with_external(bars, &[], account_balance)
    }

    /// Run the pipeline with externally injected predictor signals.
    ///
    /// Injected signals skip detection and scoring but face the same filters
    /// and sizing gates as everything else.
    pub fn run_with_external(
        &self,
        bars: &[Bar],
        external: &[ExternalSignal],
        account_balance: f64,
    ) -> EngineReport {
        let mut warnings = Vec::new();
        let sane = sanitize(bars, &mut warnings);

        let events = detect_window(&sane, &self.detectors);
        let event_count = events.len();

        let mut signals: Vec<Signal> = events
            .iter()
            .filter_map(|event| self.scorer.score(event, &sane))
            .collect();

        for ext in external {
            let price = ext
                .price
                .or_else(|| nearest_bar_index(&sane, ext.timestamp).map(|i| sane[i].close));
            match price {
                Some(price) => signals.push(ext.clone().into_signal(price)),
                None => warnings.push(format!(
                    "{}: dropped external signal at {}: no price and no bars to resolve one",
                    ext.symbol, ext.timestamp
                )),
            }
        }

        let signal_count = signals.len();

        // Evaluation instant: the latest timestamp the window knows about.
        // Never the wall clock — identical windows must filter identically.
        let as_of: Option<DateTime<Utc>> = sane
            .last()
            .map(|b| b.timestamp)
            .into_iter()
            .chain(signals.iter().map(|s| s.timestamp))
            .max();
        let Some(as_of) = as_of else {
            return EngineReport {
                data_quality_warnings: warnings,
                ..EngineReport::default()
            };
        };

        let outcome = self.filters.run(signals, as_of);

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for signal in outcome.kept {
            let sizing = self.sizer.size(&signal, account_balance);
            if sizing.accepted {
                accepted.push((signal, sizing));
            } else {
                rejected.push((signal, sizing));
            }
        }

        EngineReport {
            accepted,
            rejected,
            filtered: outcome.dropped,
            data_quality_warnings: warnings,
            bar_count: sane.len(),
            event_count,
            signal_count,
        }
    }

    /// Run independent instrument windows in parallel.
    ///
    /// Each window gets its own full pipeline run; no state is shared, so
    /// the fan-out needs no coordination.
    pub fn run_universe(&self, windows: &[Vec<Bar>], account_balance: f64) -> Vec<EngineReport> {
        windows
            .par_iter()
            .map(|bars| self.run(bars, account_balance))
            .collect()
    }
}

/// Bar hygiene: drop void/insane bars and timestamp-order violations,
/// recording one warning per skipped bar. Local recovery only — a bad bar
/// never aborts the run.
fn sanitize(bars: &[Bar], warnings: &mut Vec<String>) -> Vec<Bar> {
    let mut sane: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        if !bar.is_sane() {
            warnings.push(format!(
                "{}: skipped invalid bar at {} (void or inconsistent OHLCV)",
                bar.symbol, bar.timestamp
            ));
            continue;
        }
        if let Some(prev) = sane.last() {
            if bar.timestamp <= prev.timestamp {
                warnings.push(format!(
                    "{}: skipped bar at {}: timestamp not after {}",
                    bar.symbol, bar.timestamp, prev.timestamp
                ));
                continue;
            }
        }
        sane.push(bar.clone());
    }
    sane
}
