//! Session-held gauge weight store.
//!
//! The store owns the user's per-asset weights and their simulated return
//! series for the lifetime of a session. Edits signal whether anything
//! actually changed; the caller triggers recomputation on a `true` return.
//! Nothing here renormalizes: weights are allowed to drift out of summing
//! to 1 while the user is mid-edit, and the engine must see exactly what
//! the user set.

use serde::{Deserialize, Serialize};

/// Weight resolution of the UI's fraction slider: four decimal places,
/// i.e. basis points of a [0, 1] fraction.
pub const WEIGHT_DECIMALS: u32 = 4;

/// Rounds a weight to the canonical UI resolution.
///
/// Equality of weights is defined on this rounding: a set to a value that
/// formats identically to the current one is a no-op.
#[must_use]
pub fn canonical_weight(weight: f64) -> f64 {
    let scale = 10f64.powi(WEIGHT_DECIMALS as i32);
    (weight * scale).round() / scale
}

/// Fractional allocation of pooled assets to one token, with its
/// simulated per-sample multiplicative returns (1.003 = +0.3%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeWeight {
    /// Token symbol.
    pub name: String,

    /// Allocation fraction in [0, 1].
    pub weight: f64,

    /// Fixed-length ordered per-sample multiplicative returns.
    pub simulated_returns: Vec<f64>,
}

impl GaugeWeight {
    /// Creates a gauge weight with a canonically rounded fraction.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64, simulated_returns: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            weight: canonical_weight(weight),
            simulated_returns,
        }
    }
}

/// The session's gauge weight list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStore {
    weights: Vec<GaugeWeight>,
}

impl WeightStore {
    /// Creates a store from the upstream-supplied initial weights.
    #[must_use]
    pub fn new(weights: Vec<GaugeWeight>) -> Self {
        Self { weights }
    }

    /// The current weights, in upstream order.
    #[must_use]
    pub fn weights(&self) -> &[GaugeWeight] {
        &self.weights
    }

    /// Looks up a gauge by token symbol.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GaugeWeight> {
        self.weights.iter().find(|w| w.name == name)
    }

    /// Number of gauges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the store holds no gauges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sets one gauge's weight fraction.
    ///
    /// Returns `false` — leaving state untouched — when the gauge is
    /// unknown or the new value rounds to the current one. Returns `true`
    /// after updating only the targeted entry; other weights are **not**
    /// renormalized, and recomputation is the caller's move.
    pub fn set_weight(&mut self, name: &str, weight: f64) -> bool {
        let Some(entry) = self.weights.iter_mut().find(|w| w.name == name) else {
            return false;
        };

        let next = canonical_weight(weight);
        if next == entry.weight {
            return false;
        }

        entry.weight = next;
        true
    }

    /// Sets every gauge to the same weight fraction in one batch.
    ///
    /// Returns `true` iff at least one entry changed under canonical
    /// rounding. This is the bulk-edit operation; there is no timer or
    /// debounce behind it.
    pub fn set_all(&mut self, weight: f64) -> bool {
        let next = canonical_weight(weight);
        let mut changed = false;
        for entry in &mut self.weights {
            if entry.weight != next {
                entry.weight = next;
                changed = true;
            }
        }
        changed
    }
}
