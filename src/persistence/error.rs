//! The error taxonomy of the store.
//!
//! Every failure is handed back to the immediate caller. Nothing here is
//! transient, so nothing is ever retried.

use thiserror::Error;

use super::RowId;

/// Result type for all table, index and query operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert reused an id that is already present. The table is left
    /// unchanged.
    #[error("duplicate key {0}: row is already present in table")]
    DuplicateKey(RowId),

    /// Changing the id column, naming a column that is not indexed (or does
    /// not exist), or handing a column a value of the wrong type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A table lock was poisoned by a panicking writer.
    #[error("poisoned lock on table {0}")]
    Poisoned(String),
}
