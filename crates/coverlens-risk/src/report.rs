//! Guarded portfolio VaR computation.
//!
//! The host recomputes the whole statistic whenever a weight edit signals
//! a change or the confidence slider moves; a new result supersedes the
//! previous one. Any defect in the inputs — no gauges, empty or mismatched
//! series, analytics not permitted upstream — produces an explicit
//! unavailable outcome rather than an error or a panic.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::simulate::simulate_portfolio_returns;
use crate::var::{confidence_label, empirical_quantile, loss_percentage, quantile_for_slider};
use crate::weights::WeightStore;

/// A computed portfolio VaR, ready for an external charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarReport {
    /// Simulated portfolio return series.
    pub portfolio_returns: Vec<f64>,

    /// VaR multiplier at the requested confidence (0.97 ⇒ 3% loss).
    pub value_at_risk: f64,

    /// `(value_at_risk - 1) × 100`, negative for losses.
    pub loss_percentage: f64,

    /// Quantile taken over the return distribution.
    pub quantile: f64,

    /// User-facing confidence label, e.g. `"99.95%"`.
    pub confidence_label: String,
}

/// Outcome of one portfolio VaR recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarOutcome {
    /// Inputs were unusable; the host renders an empty state.
    Unavailable,
    /// The statistic was computed.
    Computed(VarReport),
}

impl VarOutcome {
    /// Returns the report, if one was computed.
    #[must_use]
    pub fn report(&self) -> Option<&VarReport> {
        match self {
            Self::Computed(report) => Some(report),
            Self::Unavailable => None,
        }
    }

    /// Returns true when no statistic could be computed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Recomputes the portfolio VaR from the current weights.
///
/// # Arguments
///
/// * `store` - The session's gauge weights
/// * `range_value` - Confidence slider position in `[1, 1000]`
/// * `analytics_permitted` - Upstream gate; when false the result is
///   unavailable regardless of the weights
#[must_use]
pub fn compute_portfolio_var(
    store: &WeightStore,
    range_value: u32,
    analytics_permitted: bool,
) -> VarOutcome {
    if !analytics_permitted {
        debug!("analytics not permitted, VaR unavailable");
        return VarOutcome::Unavailable;
    }

    let quantile = match quantile_for_slider(range_value) {
        Ok(q) => q,
        Err(err) => {
            debug!("VaR unavailable: {err}");
            return VarOutcome::Unavailable;
        }
    };

    let portfolio_returns = match simulate_portfolio_returns(store.weights()) {
        Ok(returns) => returns,
        Err(err) => {
            debug!("VaR unavailable: {err}");
            return VarOutcome::Unavailable;
        }
    };

    let value_at_risk = match empirical_quantile(&portfolio_returns, quantile) {
        Ok(var) => var,
        Err(err) => {
            debug!("VaR unavailable: {err}");
            return VarOutcome::Unavailable;
        }
    };

    let label = match confidence_label(range_value) {
        Ok(label) => label,
        Err(err) => {
            debug!("VaR unavailable: {err}");
            return VarOutcome::Unavailable;
        }
    };

    VarOutcome::Computed(VarReport {
        loss_percentage: loss_percentage(value_at_risk),
        value_at_risk,
        quantile,
        confidence_label: label,
        portfolio_returns,
    })
}
