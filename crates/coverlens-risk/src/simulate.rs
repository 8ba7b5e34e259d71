//! Weighted portfolio return simulation.

use crate::error::{RiskError, RiskResult};
use crate::weights::GaugeWeight;

/// Combines per-asset simulated returns into one portfolio return series.
///
/// `result[i] = Σ_j weight_j × returns_j[i]` over the shared sample count
/// of the input series. Weights are taken as-is; if they do not sum to 1
/// the output reflects that.
///
/// # Errors
///
/// Returns an error when there are no gauges, any series is empty, or the
/// series lengths disagree. Callers surface these as an unavailable
/// result, not a failure.
pub fn simulate_portfolio_returns(weights: &[GaugeWeight]) -> RiskResult<Vec<f64>> {
    if weights.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }

    let sample_count = weights[0].simulated_returns.len();
    for gauge in weights {
        if gauge.simulated_returns.is_empty() {
            return Err(RiskError::empty_series(&gauge.name));
        }
        if gauge.simulated_returns.len() != sample_count {
            return Err(RiskError::length_mismatch(
                &gauge.name,
                sample_count,
                gauge.simulated_returns.len(),
            ));
        }
    }

    let mut portfolio = vec![0.0; sample_count];
    for gauge in weights {
        for (total, sample) in portfolio.iter_mut().zip(&gauge.simulated_returns) {
            *total += gauge.weight * sample;
        }
    }

    Ok(portfolio)
}
