//! Empirical-quantile Value-at-Risk.
//!
//! The VaR statistic is the linear-interpolated empirical quantile of the
//! simulated portfolio return distribution: sort ascending, take the
//! value at `position = (n - 1) × q` with `q = 1 - confidence`,
//! interpolating between the neighboring samples. The result is a
//! multiplicative factor — 0.97 means a modeled 3% loss at that
//! confidence over one simulated day.

use std::cmp::Ordering;

use crate::error::{RiskError, RiskResult};

/// Lower bound of the UI confidence slider.
pub const SLIDER_MIN: u32 = 1;

/// Upper bound of the UI confidence slider.
pub const SLIDER_MAX: u32 = 1000;

/// Denominator of the slider mapping.
const SLIDER_SCALE: f64 = 10_000.0;

/// Maps the integer confidence slider to the quantile taken over the
/// return distribution.
///
/// The slider spans `[1, 1000]` and maps to
/// `q = (10000 - range_value) / 10000`, i.e. `q = 1 - range_value/10000`.
/// Downstream consumers format this quantile into a user-facing
/// percentage, so the mapping is computed in exactly this form.
///
/// # Errors
///
/// Returns [`RiskError::InvalidSlider`] outside `[1, 1000]`.
pub fn quantile_for_slider(range_value: u32) -> RiskResult<f64> {
    if !(SLIDER_MIN..=SLIDER_MAX).contains(&range_value) {
        return Err(RiskError::InvalidSlider { value: range_value });
    }
    Ok((SLIDER_SCALE - f64::from(range_value)) / SLIDER_SCALE)
}

/// Formats the slider's quantile as the user-facing confidence label,
/// e.g. `"99.95%"`.
///
/// # Errors
///
/// Returns [`RiskError::InvalidSlider`] outside `[1, 1000]`.
pub fn confidence_label(range_value: u32) -> RiskResult<String> {
    let quantile = quantile_for_slider(range_value)?;
    Ok(format!("{:.2}%", quantile * 100.0))
}

/// Converts a VaR multiplier into a signed percentage move,
/// `(var - 1) × 100`; negative values are losses.
#[must_use]
pub fn loss_percentage(var_multiplier: f64) -> f64 {
    (var_multiplier - 1.0) * 100.0
}

/// Computes the Value-at-Risk multiplier of a simulated return series.
///
/// # Arguments
///
/// * `portfolio_returns` - Simulated per-sample multiplicative returns
/// * `confidence` - Confidence level in (0, 1); the quantile taken is
///   `q = 1 - confidence`
///
/// # Errors
///
/// Returns an error for an empty series or a confidence outside (0, 1).
pub fn value_at_risk(portfolio_returns: &[f64], confidence: f64) -> RiskResult<f64> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(RiskError::InvalidConfidence { value: confidence });
    }
    empirical_quantile(portfolio_returns, 1.0 - confidence)
}

/// Linear-interpolated empirical quantile of a return series.
///
/// Sorts a copy ascending and interpolates at `position = (n - 1) × q`.
/// This is the entry point driven by the confidence slider, which supplies
/// `q` directly.
///
/// # Errors
///
/// Returns an error for an empty series or a quantile outside [0, 1].
pub fn empirical_quantile(portfolio_returns: &[f64], q: f64) -> RiskResult<f64> {
    if portfolio_returns.is_empty() {
        return Err(RiskError::EmptyReturns);
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(RiskError::InvalidConfidence { value: 1.0 - q });
    }

    let mut sorted = portfolio_returns.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    if lower == upper {
        return Ok(sorted[lower]);
    }

    let fraction = position - lower as f64;
    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}
