//! Validated policy and position records.
//!
//! Raw upstream entries are stringly typed; this module converts them into
//! the records the aggregation pipelines work with, rejecting anything
//! whose numeric fields do not parse. Cover limits stay in raw 18-decimal
//! fixed-point units as [`Decimal`] values; derived analytics use `f64`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::snapshot::{RawPolicy, RawPosition};

/// Product label stamped on every indexed policy.
pub const PRODUCT_SPI_V3: &str = "SPI V3";

/// Number of fixed-point decimals in on-chain token amounts.
pub const FIXED_POINT_DECIMALS: u32 = 18;

fn fixed_point_unit() -> Decimal {
    // 10^18 fits in an i64, so Decimal::new is exact here.
    Decimal::new(1_000_000_000_000_000_000, 0)
}

/// Parses an 18-decimal fixed-point integer string into raw units.
///
/// Returns `None` for anything that is not a plain decimal number.
#[must_use]
pub fn parse_fixed_point(value: &str) -> Option<Decimal> {
    value.trim().parse::<Decimal>().ok()
}

/// Converts raw 18-decimal fixed-point units into a float amount.
#[must_use]
pub fn fixed_point_to_f64(units: Decimal) -> f64 {
    (units / fixed_point_unit()).to_f64().unwrap_or(0.0)
}

/// A validated insurance policy, tagged with its source network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Numeric policy identifier.
    pub policy_id: u64,

    /// Address of the policyholder.
    pub policyholder: String,

    /// Cover limit in raw 18-decimal fixed-point units.
    pub cover_limit: Decimal,

    /// Deposits made, raw units. Zero when the feed omits or garbles it.
    pub deposits_made: Decimal,

    /// Premiums charged, raw units. Zero when the feed omits or garbles it.
    pub premiums_charged: Decimal,

    /// Network the policy was issued on.
    pub network: String,

    /// Product label, always [`PRODUCT_SPI_V3`].
    pub product: String,

    /// Modeled exposure in USD, assigned during protocol aggregation.
    pub exposure: Option<f64>,
}

impl PolicyRecord {
    /// Validates a raw policy from the given network.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedCoverLimit`] when the cover limit is
    /// not numeric; such records are dropped by the index builder.
    pub fn from_raw(raw: &RawPolicy, network: &str) -> CoreResult<Self> {
        let cover_limit = parse_fixed_point(&raw.cover_limit).ok_or_else(|| {
            CoreError::malformed_cover_limit(&raw.policyholder, &raw.cover_limit)
        })?;

        // Deposits and premiums are informational; a garbled value does not
        // invalidate the policy.
        let deposits_made = parse_fixed_point(&raw.deposits_made).unwrap_or_default();
        let premiums_charged = parse_fixed_point(&raw.premiums_charged).unwrap_or_default();

        Ok(Self {
            policy_id: raw.policy_id,
            policyholder: raw.policyholder.clone(),
            cover_limit,
            deposits_made,
            premiums_charged,
            network: network.to_string(),
            product: PRODUCT_SPI_V3.to_string(),
            exposure: None,
        })
    }

    /// Returns the cover limit as a USD float amount.
    #[must_use]
    pub fn cover_limit_usd(&self) -> f64 {
        fixed_point_to_f64(self.cover_limit)
    }
}

/// A validated position held by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Protocol the position sits in.
    pub app_id: String,

    /// Network the position sits on.
    pub network: String,

    /// USD balance of the position.
    pub balance_usd: f64,
}

impl PositionRecord {
    /// Validates a raw position.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedBalance`] when the balance is not
    /// numeric; such positions are dropped by the index builder.
    pub fn from_raw(raw: &RawPosition) -> CoreResult<Self> {
        let balance_usd = raw.balance_usd.as_f64().ok_or_else(|| {
            let shown = match &raw.balance_usd {
                crate::snapshot::RawNumber::Number(n) => n.to_string(),
                crate::snapshot::RawNumber::Text(s) => s.clone(),
            };
            CoreError::malformed_balance(&raw.app_id, shown)
        })?;

        Ok(Self {
            app_id: raw.app_id.clone(),
            network: raw.network.clone(),
            balance_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RawNumber;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn raw_policy(cover_limit: &str) -> RawPolicy {
        RawPolicy {
            policy_id: 1,
            policyholder: "0xaaa".to_string(),
            cover_limit: cover_limit.to_string(),
            deposits_made: "2000000000000000000".to_string(),
            premiums_charged: String::new(),
        }
    }

    #[test]
    fn test_policy_from_raw() {
        let record = PolicyRecord::from_raw(&raw_policy("1000000000000000000000"), "ethereum")
            .unwrap();

        assert_eq!(record.policy_id, 1);
        assert_eq!(record.network, "ethereum");
        assert_eq!(record.product, PRODUCT_SPI_V3);
        assert_eq!(record.cover_limit, dec!(1000000000000000000000));
        assert_eq!(record.deposits_made, dec!(2000000000000000000));
        assert_eq!(record.premiums_charged, Decimal::ZERO);
        assert!(record.exposure.is_none());
    }

    #[test]
    fn test_policy_malformed_cover_limit() {
        let err = PolicyRecord::from_raw(&raw_policy("n/a"), "ethereum").unwrap_err();
        assert!(matches!(err, CoreError::MalformedCoverLimit { .. }));
    }

    #[test]
    fn test_cover_limit_usd() {
        let record = PolicyRecord::from_raw(&raw_policy("1000000000000000000000"), "ethereum")
            .unwrap();

        // 1000e18 raw units = 1000 USD.
        assert_relative_eq!(record.cover_limit_usd(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_point_round_trip() {
        assert_relative_eq!(
            fixed_point_to_f64(dec!(500000000000000000)),
            0.5,
            epsilon = 1e-12
        );
        assert_eq!(parse_fixed_point("  42  "), Some(dec!(42)));
        assert_eq!(parse_fixed_point("4.2e3"), None);
        assert_eq!(parse_fixed_point("forty two"), None);
    }

    #[test]
    fn test_position_from_raw() {
        let record = PositionRecord::from_raw(&RawPosition {
            app_id: "aave-v3".to_string(),
            network: "polygon".to_string(),
            balance_usd: RawNumber::Text("600.25".to_string()),
        })
        .unwrap();

        assert_eq!(record.app_id, "aave-v3");
        assert_relative_eq!(record.balance_usd, 600.25, epsilon = 1e-12);
    }

    #[test]
    fn test_position_malformed_balance() {
        let err = PositionRecord::from_raw(&RawPosition {
            app_id: "aave-v3".to_string(),
            network: "polygon".to_string(),
            balance_usd: RawNumber::Text("??".to_string()),
        })
        .unwrap_err();

        assert!(matches!(err, CoreError::MalformedBalance { .. }));
    }
}
