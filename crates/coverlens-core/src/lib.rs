//! # Coverlens Core
//!
//! Domain types and upstream snapshot model for the Coverlens analytics
//! library.
//!
//! This crate provides the foundational building blocks used throughout
//! Coverlens:
//!
//! - **Snapshot model**: typed serde representation of the upstream
//!   coverage-protocol document (per-network policy lists, account-keyed
//!   positions, risk-tier reference series)
//! - **Records**: validated [`PolicyRecord`] / [`PositionRecord`] types,
//!   parsed at the ingestion boundary
//! - **Risk reference**: protocol → tier/category/rate-on-line lookup with
//!   worst-tier fallback
//!
//! ## Design Philosophy
//!
//! - **Parse, don't propagate**: loosely-typed raw data is validated here;
//!   a record that fails to parse is dropped where it is found and never
//!   reaches an aggregation pipeline
//! - **Immutable snapshots**: every recomputation consumes one snapshot
//!   wholesale; nothing is patched in place
//! - **Explicit over ambient**: reference data is passed into the
//!   aggregators as arguments, never read from shared context
//!
//! ## Example
//!
//! ```rust,ignore
//! use coverlens_core::prelude::*;
//!
//! let snapshot = UpstreamSnapshot::from_json(&document)?;
//! let lists = snapshot.policy_lists(&DEFAULT_NETWORK_ORDER);
//! let reference = snapshot.series_data().and_then(RiskReference::from_series);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod records;
pub mod reference;
pub mod snapshot;

// Re-export error types at crate root
pub use error::{CoreError, CoreResult};

// Re-export main types
pub use records::{
    fixed_point_to_f64, parse_fixed_point, PolicyRecord, PositionRecord, FIXED_POINT_DECIMALS,
    PRODUCT_SPI_V3,
};
pub use reference::{RiskReference, TierInfo, FALLBACK_CATEGORY, FALLBACK_TIER};
pub use snapshot::{
    AccountPositions, NetworkPolicyList, ProductSection, ProtocolMapEntry, RateCardEntry,
    RawNumber, RawPolicy, RawPosition, SeriesData, SeriesSection, UpstreamSnapshot,
    DEFAULT_NETWORK_ORDER, PRODUCT_KEY_SUFFIX,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use coverlens_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::records::{PolicyRecord, PositionRecord, PRODUCT_SPI_V3};
    pub use crate::reference::{RiskReference, TierInfo};
    pub use crate::snapshot::{
        AccountPositions, NetworkPolicyList, RawPolicy, RawPosition, UpstreamSnapshot,
        DEFAULT_NETWORK_ORDER,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = CoreError::invalid_document("bad");
        assert!(err.to_string().contains("bad"));
    }
}
