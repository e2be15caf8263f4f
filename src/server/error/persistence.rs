//! Best-effort persistence failures.
//!
//! Writes to the persistent cache tier never abort a resolution that already has its
//! answer. Failures are wrapped in [`PersistenceWarning`] and logged instead of returned.

use thiserror::Error;

/// A failed write or lookup against the persistent tier.
#[derive(Error, Debug)]
#[error("Failed to {operation} {target} {key:?} in the persistent cache: {source}")]
pub struct PersistenceWarning {
    /// Statement that failed, e.g. "insert"
    pub operation: &'static str,
    /// Table family, e.g. "profile"
    pub target: &'static str,
    /// Cache key ID of the row
    pub key: String,
    /// Database failure
    #[source]
    pub source: sea_orm::DbErr,
}

impl PersistenceWarning {
    /// Creates a new instance of [`PersistenceWarning`]
    pub fn new(
        operation: &'static str,
        target: &'static str,
        key: impl Into<String>,
        source: sea_orm::DbErr,
    ) -> Self {
        Self {
            operation,
            target,
            key: key.into(),
            source,
        }
    }

    /// Emit the warning; the caller continues with its result
    pub fn log(self) {
        tracing::warn!("{}", self);
    }
}
