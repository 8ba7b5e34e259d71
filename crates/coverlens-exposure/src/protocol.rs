//! Per-protocol exposure aggregation.
//!
//! Joins the policy index and position index with the risk-tier reference
//! into one [`ProtocolExposure`] row per `(app_id, network)` pair. Only
//! addresses present in both indices contribute; everything else is
//! silently skipped. The whole pass is recomputed from scratch on every
//! snapshot refresh — there is no incremental update path.
//!
//! Accumulation notes, preserved from the reference behavior:
//!
//! - A holder's exposure is `min(highest single position, cover limit)`,
//!   with ties on the highest position broken by first-encountered order.
//! - That per-holder exposure is added to a protocol's `total_exposure`
//!   once **per position** the holder has in the protocol, not once per
//!   holder. A holder with two positions in the same protocol counts
//!   double. Downstream consumers rely on this; do not "fix" it here.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use coverlens_core::records::{PolicyRecord, PositionRecord};
use coverlens_core::reference::RiskReference;

use crate::policy_index::PolicyIndex;
use crate::position_index::PositionIndex;

/// Aggregated exposure for one protocol on one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolExposure {
    /// Protocol identifier.
    pub app_id: String,

    /// Network the positions sit on.
    pub network: String,

    /// Letter-grade risk tier from the reference table.
    pub tier: String,

    /// Protocol category from the reference table.
    pub category: String,

    /// Annual premium rate applied to loss payout amounts.
    pub rate_on_line: f64,

    /// Sum of position balances in this protocol.
    pub balance_usd: f64,

    /// Sum of cover limits of the contributing policies, once per position.
    pub cover_limit: f64,

    /// Largest single contributing position balance.
    pub highest_position: f64,

    /// Sum of per-holder exposures, added once per position.
    pub total_exposure: f64,

    /// Sum over positions of `min(cover limit, position balance)`.
    pub total_loss_payout_amount: f64,

    /// Sum over positions of loss payout × rate-on-line.
    pub premiums_per_year: f64,

    /// Contributing policies, appended once per position.
    pub policies: Vec<PolicyRecord>,

    /// Contributing positions.
    pub positions: Vec<PositionRecord>,
}

impl ProtocolExposure {
    fn new(app_id: &str, network: &str, reference: &RiskReference) -> Self {
        let info = reference.lookup(app_id);
        Self {
            app_id: app_id.to_string(),
            network: network.to_string(),
            tier: info.tier,
            category: info.category,
            rate_on_line: info.rate_on_line,
            balance_usd: 0.0,
            cover_limit: 0.0,
            highest_position: 0.0,
            total_exposure: 0.0,
            total_loss_payout_amount: 0.0,
            premiums_per_year: 0.0,
            policies: Vec::new(),
            positions: Vec::new(),
        }
    }
}

/// Column totals derived from a set of protocol rows.
///
/// Computable from the aggregation result alone; nothing re-reads the raw
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolTotals {
    /// Sum of `balance_usd` across rows.
    pub balance_usd: f64,
    /// Sum of `cover_limit` across rows.
    pub cover_limit: f64,
    /// Sum of `highest_position` across rows.
    pub highest_position: f64,
    /// Sum of `total_exposure` across rows.
    pub total_exposure: f64,
    /// Sum of `total_loss_payout_amount` across rows.
    pub total_loss_payout_amount: f64,
    /// Sum of `premiums_per_year` across rows.
    pub premiums_per_year: f64,
    /// Total number of policy entries across rows.
    pub policy_count: usize,
}

impl ProtocolTotals {
    /// Sums each numeric column over the given rows.
    #[must_use]
    pub fn from_rows(rows: &[ProtocolExposure]) -> Self {
        let mut totals = Self::default();
        for row in rows {
            totals.balance_usd += row.balance_usd;
            totals.cover_limit += row.cover_limit;
            totals.highest_position += row.highest_position;
            totals.total_exposure += row.total_exposure;
            totals.total_loss_payout_amount += row.total_loss_payout_amount;
            totals.premiums_per_year += row.premiums_per_year;
            totals.policy_count += row.policies.len();
        }
        totals
    }
}

/// Returns the position with the largest balance, first occurrence winning
/// ties. The tie-break makes the result order-sensitive by construction.
fn highest_position(positions: &[PositionRecord]) -> Option<&PositionRecord> {
    let mut best: Option<&PositionRecord> = None;
    for p in positions {
        match best {
            Some(b) if p.balance_usd <= b.balance_usd => {}
            _ => best = Some(p),
        }
    }
    best
}

/// Aggregates exposure per `(app_id, network)` pair.
///
/// Rows come back in first-encounter order over the (deterministically
/// ordered) policy index, so repeated calls on unchanged input yield an
/// element-wise identical result.
#[must_use]
pub fn aggregate_by_protocol(
    policies: &PolicyIndex,
    positions: &PositionIndex,
    reference: &RiskReference,
) -> Vec<ProtocolExposure> {
    let mut rows: Vec<ProtocolExposure> = Vec::new();
    let mut row_index: HashMap<(String, String), usize> = HashMap::new();

    for (holder, policy) in policies {
        // Addresses absent from the position index contribute nothing.
        let Some(entry) = positions.get(holder) else {
            continue;
        };
        let holder_positions = entry.positions();
        let Some(highest) = highest_position(holder_positions) else {
            continue;
        };

        let cover_limit_usd = policy.cover_limit_usd();
        let policy_exposure = highest.balance_usd.min(cover_limit_usd);

        let mut priced_policy = policy.clone();
        priced_policy.exposure = Some(policy_exposure);

        for position in holder_positions {
            let key = (position.app_id.clone(), position.network.clone());
            let idx = match row_index.get(&key) {
                Some(&idx) => idx,
                None => {
                    rows.push(ProtocolExposure::new(
                        &position.app_id,
                        &position.network,
                        reference,
                    ));
                    let idx = rows.len() - 1;
                    row_index.insert(key, idx);
                    idx
                }
            };
            let row = &mut rows[idx];

            let loss_payout = cover_limit_usd.min(position.balance_usd);

            row.balance_usd += position.balance_usd;
            row.cover_limit += cover_limit_usd;
            row.highest_position = row.highest_position.max(highest.balance_usd);
            row.total_exposure += policy_exposure;
            row.total_loss_payout_amount += loss_payout;
            row.premiums_per_year += loss_payout * row.rate_on_line;
            row.policies.push(priced_policy.clone());
            row.positions.push(position.clone());
        }
    }

    debug!(
        "protocol aggregation: {} rows from {} holders",
        rows.len(),
        policies.len()
    );

    rows
}
