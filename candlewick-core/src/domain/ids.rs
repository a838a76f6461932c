use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic signal ID.
///
/// Derived from the signal's identity fields (symbol, timestamp, pattern,
/// direction) so that two runs over the same bar window produce the same IDs.
/// Uses BLAKE3 over a canonical JSON encoding for stable, collision-resistant
/// hashing across builds and platforms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalId(pub String);

impl SignalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the ID from the signal's identity fields.
    pub fn derive(
        symbol: &str,
        timestamp: DateTime<Utc>,
        pattern: &str,
        direction: &str,
    ) -> Self {
        use serde_json::json;

        // Canonical serialization (sorted keys)
        let canonical = json!({
            "direction": direction,
            "pattern": pattern,
            "symbol": symbol,
            "timestamp": timestamp.to_rfc3339(),
        });

        let hash = blake3::hash(canonical.to_string().as_bytes());
        Self(hash.to_hex().to_string())
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap()
    }

    #[test]
    fn derive_is_deterministic() {
        let a = SignalId::derive("EURUSD", ts(), "bullish_engulfing", "bullish");
        let b = SignalId::derive("EURUSD", ts(), "bullish_engulfing", "bullish");
        assert_eq!(a, b);
    }

    #[test]
    fn derive_differs_by_pattern() {
        let a = SignalId::derive("EURUSD", ts(), "bullish_engulfing", "bullish");
        let b = SignalId::derive("EURUSD", ts(), "doji", "neutral");
        assert_ne!(a, b);
    }

    #[test]
    fn derive_differs_by_symbol() {
        let a = SignalId::derive("EURUSD", ts(), "doji", "neutral");
        let b = SignalId::derive("GBPUSD", ts(), "doji", "neutral");
        assert_ne!(a, b);
    }
}
