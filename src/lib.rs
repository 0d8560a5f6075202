//! An in-memory, single-process indexed record store.
//!
//! - [`persistence`] holds the [`persistence::Table`] and the indices it keeps
//! in sync with its rows.
//! - [`query`] is the lazy, composable filter algebra evaluated over a table.
//! - [`accounts`] is a users-and-addresses schema built on top of both.

pub mod accounts;
pub mod persistence;
pub mod query;
