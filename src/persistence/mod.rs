//! Persistence as in-memory tables needs to have the following components
//! - Schema (the typed columns of a row type and which of them are indexed)
//! - IdentitySet (insertion-ordered set of row ids, the bucket of an index)
//! - OrderedMultiset (sorted distinct values, each with its set of ids)
//! - ColumnIndex (one per indexed column, for lookups and ordered walks)
//! - Table (the rows themselves, keeping every index in sync)
//!

//  All modules of this lib
mod error;
mod identity_set;
mod index;
mod multiset;
mod schema;
mod table;
mod value;

/// The identifier of a row. It is fixed once the row is inserted.
pub type RowId = uuid::Uuid;

//  External API
pub use error::{StoreError, StoreResult};
pub use identity_set::IdentitySet;
pub use index::ColumnIndex;
pub use multiset::{Direction, OrderedMultiset};
pub use schema::{Column, ColumnInformation, Getter, Record, Schema, Setter};
pub use table::Table;
pub use value::Value;
