//! Error types for the Coverlens core crate.
//!
//! These errors surface at the ingestion boundary (parsing raw upstream
//! data into validated records) and when deserializing a snapshot
//! document. The aggregation pipelines themselves never propagate them;
//! a record that fails to parse is dropped where it is found.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised at the ingestion boundary.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// A policy's cover limit could not be parsed as a fixed-point integer.
    #[error("Malformed cover limit for {policyholder}: {value:?}")]
    MalformedCoverLimit {
        /// The policyholder address on the offending record.
        policyholder: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A position's balance could not be parsed as a number.
    #[error("Malformed balance for app '{app_id}': {value:?}")]
    MalformedBalance {
        /// The app the position belongs to.
        app_id: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The snapshot document could not be deserialized.
    #[error("Invalid snapshot document: {reason}")]
    InvalidDocument {
        /// Description of the deserialization failure.
        reason: String,
    },
}

impl CoreError {
    /// Create a malformed cover limit error.
    #[must_use]
    pub fn malformed_cover_limit(policyholder: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedCoverLimit {
            policyholder: policyholder.into(),
            value: value.into(),
        }
    }

    /// Create a malformed balance error.
    #[must_use]
    pub fn malformed_balance(app_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedBalance {
            app_id: app_id.into(),
            value: value.into(),
        }
    }

    /// Create an invalid document error.
    #[must_use]
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }
}
