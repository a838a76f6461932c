//! Confluence filter — requires multiple signals to agree on direction
//! within the same clock hour.
//!
//! Groups are keyed by (hour-truncated timestamp, direction). A group below
//! the minimum size is dropped whole; a qualifying group contributes exactly
//! one signal — its highest-confidence member, annotated with the group size.

use crate::patterns::Direction;
use crate::signals::Signal;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use std::collections::BTreeMap;

use super::{DroppedSignal, FilterOutcome, FilterVerdict, SignalFilter};

/// Hour bucket: calendar date plus hour-of-day, UTC.
type HourBucket = (NaiveDate, u32, Direction);

fn bucket_of(signal: &Signal) -> HourBucket {
    (
        signal.timestamp.date_naive(),
        signal.timestamp.hour(),
        signal.direction,
    )
}

/// Hard confluence requirement.
#[derive(Debug, Clone, Copy)]
pub struct ConfluenceFilter {
    pub min_group_size: usize,
}

impl ConfluenceFilter {
    pub fn new(min_group_size: usize) -> Self {
        Self { min_group_size }
    }
}

impl SignalFilter for ConfluenceFilter {
    fn name(&self) -> &str {
        "confluence_filter"
    }

    fn apply(&self, signals: Vec<Signal>, _as_of: DateTime<Utc>) -> FilterOutcome {
        // BTreeMap keeps group iteration deterministic, so drop records come
        // out in a stable order for identical inputs.
        let mut groups: BTreeMap<HourBucket, Vec<Signal>> = BTreeMap::new();
        for signal in signals {
            groups.entry(bucket_of(&signal)).or_default().push(signal);
        }

        let mut outcome = FilterOutcome::default();
        for (_, group) in groups {
            let group_size = group.len();
            if group_size < self.min_group_size {
                for signal in group {
                    outcome.dropped.push(DroppedSignal {
                        signal,
                        filter_name: self.name().to_string(),
                        verdict: FilterVerdict::FilteredByConfluence,
                    });
                }
                continue;
            }

            // Representative: highest confidence; ties go to the more recent
            // timestamp, then the smaller ID, so output is deterministic.
            let best = group
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.confidence
                        .total_cmp(&b.confidence)
                        .then_with(|| a.timestamp.cmp(&b.timestamp))
                        .then_with(|| b.id.cmp(&a.id))
                })
                .map(|(i, _)| i)
                .expect("qualifying group is non-empty");

            for (i, mut signal) in group.into_iter().enumerate() {
                if i == best {
                    signal.confluence_count = Some(group_size);
                    outcome.kept.push(signal);
                } else {
                    outcome.dropped.push(DroppedSignal {
                        signal,
                        filter_name: self.name().to_string(),
                        verdict: FilterVerdict::MergedIntoConfluence,
                    });
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{base_ts, make_signal};
    use super::*;
    use chrono::Duration;

    #[test]
    fn lone_signal_is_dropped() {
        let filter = ConfluenceFilter::new(2);
        let lone = make_signal("lone", base_ts(), Direction::Bullish, 1.0, 0.9);
        let outcome = filter.apply(vec![lone], base_ts());
        assert!(outcome.kept.is_empty());
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].verdict, FilterVerdict::FilteredByConfluence);
    }

    #[test]
    fn pair_keeps_highest_confidence_with_count() {
        let filter = ConfluenceFilter::new(2);
        let ts = base_ts();
        let a = make_signal("a", ts + Duration::minutes(5), Direction::Bullish, 1.0, 0.80);
        let b = make_signal("b", ts + Duration::minutes(40), Direction::Bullish, 1.0, 0.83);

        let outcome = filter.apply(vec![a, b], ts);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].id.0, "b");
        assert_eq!(outcome.kept[0].confluence_count, Some(2));
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].verdict, FilterVerdict::MergedIntoConfluence);
    }

    #[test]
    fn direction_splits_groups() {
        // Two signals in the same hour but opposite directions: two groups of
        // one each, both dropped.
        let filter = ConfluenceFilter::new(2);
        let ts = base_ts();
        let bull = make_signal("bull", ts, Direction::Bullish, 1.0, 0.9);
        let bear = make_signal("bear", ts + Duration::minutes(30), Direction::Bearish, 1.0, 0.9);

        let outcome = filter.apply(vec![bull, bear], ts);
        assert!(outcome.kept.is_empty());
        assert_eq!(outcome.dropped.len(), 2);
    }

    #[test]
    fn hour_boundary_splits_groups() {
        // 13:59 and 14:01 land in different hour buckets.
        let filter = ConfluenceFilter::new(2);
        let a = make_signal(
            "a",
            base_ts() + Duration::hours(13) + Duration::minutes(59),
            Direction::Bullish,
            1.0,
            0.9,
        );
        let b = make_signal(
            "b",
            base_ts() + Duration::hours(14) + Duration::minutes(1),
            Direction::Bullish,
            1.0,
            0.9,
        );
        let outcome = filter.apply(vec![a, b], base_ts());
        assert!(outcome.kept.is_empty());
    }

    #[test]
    fn triple_reports_group_size_three() {
        let filter = ConfluenceFilter::new(2);
        let ts = base_ts();
        let signals = vec![
            make_signal("a", ts, Direction::Bullish, 1.0, 0.70),
            make_signal("b", ts + Duration::minutes(10), Direction::Bullish, 1.0, 0.95),
            make_signal("c", ts + Duration::minutes(20), Direction::Bullish, 1.0, 0.80),
        ];
        let outcome = filter.apply(signals, ts);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].id.0, "b");
        assert_eq!(outcome.kept[0].confluence_count, Some(3));
        assert_eq!(outcome.dropped.len(), 2);
    }

    #[test]
    fn confidence_tie_goes_to_more_recent_signal() {
        let filter = ConfluenceFilter::new(2);
        let ts = base_ts();
        let early = make_signal("early", ts, Direction::Bullish, 1.0, 0.9);
        let late = make_signal("late", ts + Duration::minutes(30), Direction::Bullish, 1.0, 0.9);

        let outcome = filter.apply(vec![early, late], ts);
        assert_eq!(outcome.kept[0].id.0, "late");
    }

    #[test]
    fn min_group_size_one_keeps_singles() {
        let filter = ConfluenceFilter::new(1);
        let lone = make_signal("lone", base_ts(), Direction::Bullish, 1.0, 0.9);
        let outcome = filter.apply(vec![lone], base_ts());
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].confluence_count, Some(1));
    }
}
