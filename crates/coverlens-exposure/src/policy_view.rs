//! Per-policy exposure view.
//!
//! Alternate aggregation of the same indices, grouped by policy instead of
//! protocol. The exposure base here is the **sum** of a holder's resolved
//! positions, where the protocol view uses the holder's highest single
//! position. The two methodologies coexist deliberately and are not
//! reconciled; see DESIGN.md.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::policy_index::PolicyIndex;
use crate::position_index::PositionIndex;

/// One row of the policy-keyed exposure table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyExposureRow {
    /// Numeric policy identifier.
    pub policy_id: u64,

    /// Address of the policyholder.
    pub policyholder: String,

    /// Network the policy was issued on.
    pub network: String,

    /// Sum of the holder's resolved position balances.
    pub balance_usd: f64,

    /// Cover limit in USD.
    pub cover_limit: f64,

    /// `min(balance_usd, cover_limit)` — summed-position exposure base.
    pub exposure: f64,

    /// Largest single position balance for the holder.
    pub highest_position_usd: f64,
}

/// Builds one row per policy whose holder appears in the position index.
///
/// A holder whose resolved position list is empty still gets a row with
/// zero balance and exposure; a holder missing from the position index
/// entirely gets none.
#[must_use]
pub fn aggregate_by_policy(
    policies: &PolicyIndex,
    positions: &PositionIndex,
) -> Vec<PolicyExposureRow> {
    let mut rows = Vec::new();

    for (holder, policy) in policies {
        let Some(entry) = positions.get(holder) else {
            continue;
        };

        let mut balance_usd = 0.0;
        let mut highest_position_usd = 0.0f64;
        for position in entry.positions() {
            balance_usd += position.balance_usd;
            highest_position_usd = highest_position_usd.max(position.balance_usd);
        }

        let cover_limit = policy.cover_limit_usd();

        rows.push(PolicyExposureRow {
            policy_id: policy.policy_id,
            policyholder: holder.clone(),
            network: policy.network.clone(),
            balance_usd,
            cover_limit,
            exposure: balance_usd.min(cover_limit),
            highest_position_usd,
        });
    }

    debug!("policy view: {} rows", rows.len());

    rows
}
