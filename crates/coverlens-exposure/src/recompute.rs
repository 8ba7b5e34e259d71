//! Full-recompute entry point.
//!
//! The host calls [`recompute_exposure`] whenever the upstream snapshot
//! changes; there is no incremental path and no hidden scheduler. An
//! incomplete snapshot (missing policy, position, or reference section)
//! short-circuits to an empty report — the caller renders a loading/empty
//! state, never an error.

use log::debug;
use serde::{Deserialize, Serialize};

use coverlens_core::reference::RiskReference;
use coverlens_core::snapshot::{UpstreamSnapshot, DEFAULT_NETWORK_ORDER};

use crate::policy_index::build_policy_index;
use crate::policy_view::{aggregate_by_policy, PolicyExposureRow};
use crate::position_index::build_position_index;
use crate::protocol::{aggregate_by_protocol, ProtocolExposure, ProtocolTotals};

/// One recomputation's worth of exposure views.
///
/// Plain serializable data, independent of any rendering technology.
/// Nothing in it outlives the pass that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureReport {
    /// Protocol-keyed exposure rows, in first-encounter order.
    pub protocols: Vec<ProtocolExposure>,

    /// Column totals over the protocol rows.
    pub totals: ProtocolTotals,

    /// Policy-keyed exposure rows.
    pub policies: Vec<PolicyExposureRow>,
}

impl ExposureReport {
    /// Returns true if the report carries no rows (incomplete snapshot or
    /// an empty join).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty() && self.policies.is_empty()
    }
}

/// Recomputes both exposure views from one snapshot, using the default
/// network processing order.
#[must_use]
pub fn recompute_exposure(snapshot: &UpstreamSnapshot) -> ExposureReport {
    recompute_exposure_with_order(snapshot, &DEFAULT_NETWORK_ORDER)
}

/// Recomputes both exposure views with an explicit network order.
///
/// The order matters: it decides which network's record survives for a
/// policyholder covered on several networks.
#[must_use]
pub fn recompute_exposure_with_order(
    snapshot: &UpstreamSnapshot,
    network_order: &[&str],
) -> ExposureReport {
    if snapshot.spi.is_empty() || snapshot.positions.is_empty() {
        debug!("snapshot incomplete (policies or positions missing), returning empty report");
        return ExposureReport::default();
    }
    let Some(reference) = snapshot.series_data().and_then(RiskReference::from_series) else {
        debug!("snapshot incomplete (reference series missing), returning empty report");
        return ExposureReport::default();
    };

    let policy_index = build_policy_index(&snapshot.policy_lists(network_order));
    let position_index = build_position_index(&snapshot.positions);

    let protocols = aggregate_by_protocol(&policy_index, &position_index, &reference);
    let totals = ProtocolTotals::from_rows(&protocols);
    let policies = aggregate_by_policy(&policy_index, &position_index);

    ExposureReport {
        protocols,
        totals,
        policies,
    }
}
