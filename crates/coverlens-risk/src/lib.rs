//! # Coverlens Risk
//!
//! Portfolio volatility and Value-at-Risk analytics for the Coverlens
//! library.
//!
//! This crate combines a user-reweightable gauge weight list with
//! per-asset simulated return series into a portfolio return distribution
//! and its linear-interpolated empirical quantile (Value-at-Risk):
//!
//! - **Weight store**: session-held weights with no-op edit detection and
//!   a batch "set all" operation; never renormalized behind the user
//! - **Simulation**: weighted per-sample sum over the shared series length
//! - **VaR**: ascending sort, `q = 1 - confidence`, interpolation at
//!   `(n - 1) × q`
//! - **Guarded reporting**: defective inputs yield an explicit
//!   unavailable outcome, never an error or panic
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: the simulation and quantile are stateless with
//!   explicit inputs
//! - **Push-based recomputation**: setters only signal that something
//!   changed; the caller decides when to recompute, and a new result
//!   supersedes the old one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coverlens_risk::prelude::*;
//!
//! let mut store = WeightStore::new(initial_weights);
//! if store.set_weight("SOLACE", 0.4) {
//!     match compute_portfolio_var(&store, slider_value, true) {
//!         VarOutcome::Computed(report) => render(report),
//!         VarOutcome::Unavailable => render_empty(),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod report;
pub mod simulate;
pub mod var;
pub mod weights;

// Re-export error types at crate root
pub use error::{RiskError, RiskResult};

// Re-export main types and functions
pub use report::{compute_portfolio_var, VarOutcome, VarReport};
pub use simulate::simulate_portfolio_returns;
pub use var::{
    confidence_label, empirical_quantile, loss_percentage, quantile_for_slider, value_at_risk,
    SLIDER_MAX, SLIDER_MIN,
};
pub use weights::{canonical_weight, GaugeWeight, WeightStore, WEIGHT_DECIMALS};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use coverlens_risk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::report::{compute_portfolio_var, VarOutcome, VarReport};
    pub use crate::simulate::simulate_portfolio_returns;
    pub use crate::var::{
        confidence_label, loss_percentage, quantile_for_slider, value_at_risk,
    };
    pub use crate::weights::{GaugeWeight, WeightStore};
}
