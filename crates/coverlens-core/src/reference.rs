//! Protocol risk-tier reference table.
//!
//! Joins the snapshot's `protocolMap` (protocol → tier/category) with its
//! `rateCard` (tier → rate-on-line) into a single lookup. Protocols the
//! table does not know fall back to the worst tier rather than failing the
//! aggregation that asked.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::SeriesData;

/// Tier assigned to protocols missing from the reference table.
pub const FALLBACK_TIER: &str = "F";

/// Category assigned to protocols missing from the reference table.
pub const FALLBACK_CATEGORY: &str = "unknown";

/// Risk attributes for a protocol, as resolved by [`RiskReference::lookup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierInfo {
    /// Letter-grade risk tier.
    pub tier: String,

    /// Protocol category.
    pub category: String,

    /// Annual premium rate applied to the loss payout amount.
    pub rate_on_line: f64,
}

/// Immutable risk-tier reference built from one snapshot.
#[derive(Debug, Clone)]
pub struct RiskReference {
    by_app: HashMap<String, (String, String)>,
    rate_by_tier: HashMap<String, f64>,
    /// Rate of the first rate-card row, used for unknown tiers.
    fallback_rate: f64,
}

impl RiskReference {
    /// Builds the reference from the snapshot's series data.
    ///
    /// Returns `None` when the rate card is empty: without at least one
    /// rate row there is no fallback rate, and the snapshot counts as
    /// incomplete.
    #[must_use]
    pub fn from_series(series: &SeriesData) -> Option<Self> {
        let fallback_rate = series.rate_card.first()?.rate_on_line;

        let by_app = series
            .protocol_map
            .iter()
            .map(|entry| {
                (
                    entry.app_id.clone(),
                    (entry.tier.clone(), entry.category.clone()),
                )
            })
            .collect();

        let rate_by_tier = series
            .rate_card
            .iter()
            .map(|entry| (entry.tier.clone(), entry.rate_on_line))
            .collect();

        Some(Self {
            by_app,
            rate_by_tier,
            fallback_rate,
        })
    }

    /// Resolves the tier, category, and rate-on-line for a protocol.
    ///
    /// Unknown protocols resolve to [`FALLBACK_TIER`] / [`FALLBACK_CATEGORY`]
    /// at the first rate-card row's rate.
    #[must_use]
    pub fn lookup(&self, app_id: &str) -> TierInfo {
        match self.by_app.get(app_id) {
            Some((tier, category)) => TierInfo {
                tier: tier.clone(),
                category: category.clone(),
                rate_on_line: self.rate_for_tier(tier),
            },
            None => TierInfo {
                tier: FALLBACK_TIER.to_string(),
                category: FALLBACK_CATEGORY.to_string(),
                rate_on_line: self.fallback_rate,
            },
        }
    }

    /// Returns the rate-on-line for a tier, or the fallback rate for tiers
    /// absent from the rate card.
    #[must_use]
    pub fn rate_for_tier(&self, tier: &str) -> f64 {
        self.rate_by_tier
            .get(tier)
            .copied()
            .unwrap_or(self.fallback_rate)
    }

    /// Number of protocols the reference knows about.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_app.len()
    }

    /// Returns true if no protocols are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_app.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ProtocolMapEntry, RateCardEntry};

    fn sample_series() -> SeriesData {
        SeriesData {
            protocol_map: vec![
                ProtocolMapEntry {
                    app_id: "aave-v3".to_string(),
                    tier: "A".to_string(),
                    category: "lending".to_string(),
                },
                ProtocolMapEntry {
                    app_id: "shadowy-farm".to_string(),
                    tier: "Z".to_string(),
                    category: "yield".to_string(),
                },
            ],
            rate_card: vec![
                RateCardEntry {
                    tier: "A".to_string(),
                    rate_on_line: 0.02,
                },
                RateCardEntry {
                    tier: "F".to_string(),
                    rate_on_line: 0.1,
                },
            ],
        }
    }

    #[test]
    fn test_lookup_known() {
        let reference = RiskReference::from_series(&sample_series()).unwrap();

        let info = reference.lookup("aave-v3");
        assert_eq!(info.tier, "A");
        assert_eq!(info.category, "lending");
        assert_eq!(info.rate_on_line, 0.02);
    }

    #[test]
    fn test_lookup_unknown_falls_back() {
        let reference = RiskReference::from_series(&sample_series()).unwrap();

        let info = reference.lookup("no-such-app");
        assert_eq!(info.tier, FALLBACK_TIER);
        assert_eq!(info.category, FALLBACK_CATEGORY);
        // First rate card row.
        assert_eq!(info.rate_on_line, 0.02);
    }

    #[test]
    fn test_known_app_unknown_tier() {
        let reference = RiskReference::from_series(&sample_series()).unwrap();

        // Mapped protocol whose tier has no rate card row.
        let info = reference.lookup("shadowy-farm");
        assert_eq!(info.tier, "Z");
        assert_eq!(info.rate_on_line, 0.02);
    }

    #[test]
    fn test_empty_rate_card_is_incomplete() {
        let series = SeriesData {
            protocol_map: sample_series().protocol_map,
            rate_card: vec![],
        };
        assert!(RiskReference::from_series(&series).is_none());
    }

    #[test]
    fn test_len() {
        let reference = RiskReference::from_series(&sample_series()).unwrap();
        assert_eq!(reference.len(), 2);
        assert!(!reference.is_empty());
    }
}
