//! Error types for portfolio risk computation.

use thiserror::Error;

/// A specialized Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during volatility and VaR computation.
///
/// None of these escape to a host: [`crate::compute_portfolio_var`]
/// absorbs them into an unavailable outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// No gauge weights to simulate.
    #[error("Portfolio has no gauge weights")]
    EmptyPortfolio,

    /// A gauge has no simulated return samples.
    #[error("Simulated series for '{name}' is empty")]
    EmptySeries {
        /// The gauge whose series is empty.
        name: String,
    },

    /// Simulated series lengths disagree.
    #[error("Simulated series for '{name}' has {got} samples, expected {expected}")]
    LengthMismatch {
        /// The gauge whose series has the wrong length.
        name: String,
        /// Sample count of the first series.
        expected: usize,
        /// Sample count of the offending series.
        got: usize,
    },

    /// Confidence level outside (0, 1).
    #[error("Confidence level must be in (0, 1), got {value}")]
    InvalidConfidence {
        /// The rejected confidence level.
        value: f64,
    },

    /// Slider value outside the supported range.
    #[error("Slider value must be in [1, 1000], got {value}")]
    InvalidSlider {
        /// The rejected slider value.
        value: u32,
    },

    /// No portfolio returns to take a quantile over.
    #[error("Portfolio return series is empty")]
    EmptyReturns,
}

impl RiskError {
    /// Create an empty series error.
    #[must_use]
    pub fn empty_series(name: impl Into<String>) -> Self {
        Self::EmptySeries { name: name.into() }
    }

    /// Create a length mismatch error.
    #[must_use]
    pub fn length_mismatch(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            name: name.into(),
            expected,
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::empty_series("stable-pool");
        assert!(err.to_string().contains("stable-pool"));

        let err = RiskError::length_mismatch("alt-pool", 100, 99);
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("99"));

        let err = RiskError::InvalidConfidence { value: 1.5 };
        assert!(err.to_string().contains("1.5"));
    }
}
