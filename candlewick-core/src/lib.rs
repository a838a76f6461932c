//! Candlewick Core — candlestick signal & risk engine.
//!
//! This crate contains the whole decision path from raw bars to sized
//! signals:
//! - Domain types (bars, signal IDs)
//! - Pattern detectors (engulfing, doji) over a bounded bar window
//! - Signal scorer (volume-weighted confidence)
//! - Ordered filter pipeline (strength → recency → confluence)
//! - Risk sizing (tier step function, instrument gating, hard cap)
//! - Engine orchestration, run reports, and the rolling signal history
//!
//! Everything up to the history is pure and deterministic: the same bar
//! window and configuration always produce the same report. Bar acquisition,
//! order construction, and scheduling live outside this crate.

pub mod domain;
pub mod engine;
pub mod filters;
pub mod patterns;
pub mod risk;
pub mod signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync.
    ///
    /// Pipelines for independent instruments are expected to run on separate
    /// threads; if any type fails this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::SignalId>();
        require_sync::<domain::SignalId>();

        // Pattern types
        require_send::<patterns::PatternEvent>();
        require_sync::<patterns::PatternEvent>();
        require_send::<patterns::EngulfingDetector>();
        require_sync::<patterns::EngulfingDetector>();
        require_send::<patterns::DojiDetector>();
        require_sync::<patterns::DojiDetector>();

        // Signal types
        require_send::<signals::Signal>();
        require_sync::<signals::Signal>();
        require_send::<signals::ExternalSignal>();
        require_sync::<signals::ExternalSignal>();
        require_send::<signals::SignalScorer>();
        require_sync::<signals::SignalScorer>();

        // Filter types
        require_send::<filters::StrengthFilter>();
        require_sync::<filters::StrengthFilter>();
        require_send::<filters::RecencyFilter>();
        require_sync::<filters::RecencyFilter>();
        require_send::<filters::ConfluenceFilter>();
        require_sync::<filters::ConfluenceFilter>();
        require_send::<filters::FilterPipeline>();
        require_sync::<filters::FilterPipeline>();

        // Risk types
        require_send::<risk::RiskTierTable>();
        require_sync::<risk::RiskTierTable>();
        require_send::<risk::RiskSizer>();
        require_sync::<risk::RiskSizer>();
        require_send::<risk::SizingResult>();
        require_sync::<risk::SizingResult>();

        // Engine types
        require_send::<engine::EngineConfig>();
        require_sync::<engine::EngineConfig>();
        require_send::<engine::Engine>();
        require_sync::<engine::Engine>();
        require_send::<engine::EngineReport>();
        require_sync::<engine::EngineReport>();
        require_send::<engine::SharedSignalHistory>();
        require_sync::<engine::SharedSignalHistory>();
    }

    /// Architecture contract: pattern detectors never see portfolio state.
    ///
    /// The trait signature is `detect(&self, bars: &[Bar], index: usize)` —
    /// if someone adds an account or portfolio parameter, this stops
    /// compiling and the contract is renegotiated in the open.
    #[test]
    fn pattern_detector_trait_has_no_account_parameter() {
        fn _check_trait_object_builds(
            detector: &dyn patterns::PatternDetector,
            bars: &[domain::Bar],
        ) -> Option<patterns::PatternEvent> {
            detector.detect(bars, 0)
        }
    }

    /// Architecture contract: filters see signals and time, nothing else.
    #[test]
    fn signal_filter_trait_has_no_account_parameter() {
        fn _check_trait_object_builds(
            filter: &dyn filters::SignalFilter,
            signals: Vec<signals::Signal>,
            as_of: chrono::DateTime<chrono::Utc>,
        ) -> filters::FilterOutcome {
            filter.apply(signals, as_of)
        }
    }
}
