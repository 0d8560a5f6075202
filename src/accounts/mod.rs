//! A small users-and-addresses schema built on the store.
//!
//! It shows how an application declares its row types, registers them with
//! [`crate::persistence::Table`]s and wraps the generic
//! [`crate::query::Query`] into typed queries with domain filters such as
//! [`UserQuery::from_district`], the one filter that crosses tables.

mod database;
mod models;
mod queries;

pub use database::Database;
pub use models::{Address, User, address, user};
pub use queries::{AddressQuery, IdQuery, UserQuery};
