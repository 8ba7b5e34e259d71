//! Column-keyed sort tokens for the exposure tables.
//!
//! Display ordering is driven by tokens of the form `"<field>_A"`
//! (ascending) or `"<field>_D"` (descending), where `<field>` is the
//! upstream column name, e.g. `"balanceUSD_D"`. Text fields compare
//! lexicographically, numeric fields by value, and `_D` is exactly the
//! negation of `_A`. Sorts are stable. An unrecognized token falls back
//! to the dataset default: descending by USD balance.

use std::cmp::Ordering;

use crate::policy_view::PolicyExposureRow;
use crate::protocol::ProtocolExposure;

/// Sort direction parsed from a token suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// `_A` suffix.
    Ascending,
    /// `_D` suffix.
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A parsed `"<field>_A"` / `"<field>_D"` sort token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortToken<'a> {
    /// Upstream column name.
    pub field: &'a str,
    /// Requested direction.
    pub direction: SortDirection,
}

impl<'a> SortToken<'a> {
    /// Parses a token; `None` for anything without a `_A`/`_D` suffix.
    #[must_use]
    pub fn parse(token: &'a str) -> Option<Self> {
        let (field, suffix) = token.rsplit_once('_')?;
        let direction = match suffix {
            "A" => SortDirection::Ascending,
            "D" => SortDirection::Descending,
            _ => return None,
        };
        Some(Self { field, direction })
    }
}

fn numeric(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compares two protocol rows under a sort token.
///
/// Unrecognized tokens (or unknown fields) order by descending
/// `balanceUSD`.
#[must_use]
pub fn compare_protocol_rows(a: &ProtocolExposure, b: &ProtocolExposure, token: &str) -> Ordering {
    let Some(parsed) = SortToken::parse(token) else {
        return numeric(b.balance_usd, a.balance_usd);
    };

    let ascending = match parsed.field {
        "appId" => a.app_id.cmp(&b.app_id),
        "network" => a.network.cmp(&b.network),
        "tier" => a.tier.cmp(&b.tier),
        "category" => a.category.cmp(&b.category),
        "rateOnLine" => numeric(a.rate_on_line, b.rate_on_line),
        "balanceUSD" => numeric(a.balance_usd, b.balance_usd),
        "coverLimit" => numeric(a.cover_limit, b.cover_limit),
        "highestPosition" => numeric(a.highest_position, b.highest_position),
        "totalExposure" => numeric(a.total_exposure, b.total_exposure),
        "totalLossPayoutAmount" => numeric(a.total_loss_payout_amount, b.total_loss_payout_amount),
        "premiumsPerYear" => numeric(a.premiums_per_year, b.premiums_per_year),
        _ => return numeric(b.balance_usd, a.balance_usd),
    };
    parsed.direction.apply(ascending)
}

/// Compares two policy rows under a sort token.
///
/// Unrecognized tokens (or unknown fields) order by descending
/// `balanceUSD`.
#[must_use]
pub fn compare_policy_rows(a: &PolicyExposureRow, b: &PolicyExposureRow, token: &str) -> Ordering {
    let Some(parsed) = SortToken::parse(token) else {
        return numeric(b.balance_usd, a.balance_usd);
    };

    let ascending = match parsed.field {
        "policyID" => a.policy_id.cmp(&b.policy_id),
        "policyHolder" => a.policyholder.cmp(&b.policyholder),
        "network" => a.network.cmp(&b.network),
        "balanceUSD" => numeric(a.balance_usd, b.balance_usd),
        "coverLimit" => numeric(a.cover_limit, b.cover_limit),
        "exposure" => numeric(a.exposure, b.exposure),
        "highestPositionUSD" => numeric(a.highest_position_usd, b.highest_position_usd),
        _ => return numeric(b.balance_usd, a.balance_usd),
    };
    parsed.direction.apply(ascending)
}

/// Stable-sorts protocol rows in place under a sort token.
pub fn sort_protocol_rows(rows: &mut [ProtocolExposure], token: &str) {
    rows.sort_by(|a, b| compare_protocol_rows(a, b, token));
}

/// Stable-sorts policy rows in place under a sort token.
pub fn sort_policy_rows(rows: &mut [PolicyExposureRow], token: &str) {
    rows.sort_by(|a, b| compare_policy_rows(a, b, token));
}
