use std::sync::{Arc, RwLock};

use crate::persistence::{Direction, IdentitySet, Record, RowId, StoreResult, Table, Value};
use crate::query::{KeySource, Query};

use super::database::{Database, read, write};
use super::models::{Address, User, address, user};

/// A query over the users of a [`Database`].
///
/// Filters are cheap: they only extend the underlying [`Query`]. The tables
/// are read when the query is counted, fetched or used to mutate rows.
#[derive(Clone)]
pub struct UserQuery {
    query: Query<User>,
    db: Database,
}

/// A query over the addresses of a [`Database`].
#[derive(Clone)]
pub struct AddressQuery {
    query: Query<Address>,
    db: Database,
}

/// A query reduced to the ids it selects.
///
/// It keeps a handle on its table so it can be evaluated on its own, which is
/// what makes it usable as the [`KeySource`] of a join on another table.
pub struct IdQuery<R: Record> {
    query: Query<R>,
    table: Arc<RwLock<Table<R>>>,
}

impl UserQuery {
    pub(super) fn new(db: Database) -> UserQuery {
        UserQuery {
            query: Query::all(),
            db,
        }
    }

    fn with_query(&self, query: Query<User>) -> UserQuery {
        UserQuery {
            query,
            db: self.db.clone(),
        }
    }

    pub fn query(&self) -> &Query<User> {
        &self.query
    }

    pub fn with_id(&self, id: RowId) -> UserQuery {
        self.with_query(self.query.with_id(id))
    }

    pub fn with_name(&self, name: &str) -> UserQuery {
        self.with_query(self.query.with_column(user::NAME, name))
    }

    pub fn from_district(&self, district: &str) -> UserQuery {
        //! Keep the users whose address lies in `district`.
        //!
        //! The matching addresses are looked up anew every time the query is
        //! evaluated.

        let addresses = self.db.get_addresses().in_district(district).ids();
        self.with_query(self.query.joined_on(user::ADDRESS, Arc::new(addresses)))
    }

    pub fn ordered_by_name(&self, direction: Direction) -> UserQuery {
        self.with_query(self.query.ordered_by(user::TABLE, user::NAME, direction))
    }

    pub fn ids(&self) -> IdQuery<User> {
        IdQuery {
            query: self.query.clone(),
            table: self.db.users(),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.query.count(&*read(&self.db.users)?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.query.is_empty(&*read(&self.db.users)?)
    }

    pub fn fetch(&self) -> StoreResult<Vec<User>> {
        //! Returns a copy of the matching users, so the read is not locked
        //! anymore.

        let table = read(&self.db.users)?;
        let users = self.query.iter(&table)?.cloned().collect();
        Ok(users)
    }

    pub fn delete(&self) -> StoreResult<usize> {
        //! Delete the matching users. Returns how many were deleted.

        self.query.delete(&mut *write(&self.db.users)?)
    }

    pub fn increase_login_count(&self) -> StoreResult<usize> {
        //! Add one to the login counter of every matching user.
        //!
        //! Returns the number of processed users.

        self.query.update_each(&mut *write(&self.db.users)?, |row| {
            vec![(user::LOGIN_COUNTER, Value::Integer(row.login_counter + 1))]
        })
    }
}

impl AddressQuery {
    pub(super) fn new(db: Database) -> AddressQuery {
        AddressQuery {
            query: Query::all(),
            db,
        }
    }

    fn with_query(&self, query: Query<Address>) -> AddressQuery {
        AddressQuery {
            query,
            db: self.db.clone(),
        }
    }

    pub fn query(&self) -> &Query<Address> {
        &self.query
    }

    pub fn with_id(&self, id: RowId) -> AddressQuery {
        self.with_query(self.query.with_id(id))
    }

    pub fn in_district(&self, district: &str) -> AddressQuery {
        self.with_query(self.query.with_column(address::DISTRICT, district))
    }

    pub fn ordered_by_district(&self, direction: Direction) -> AddressQuery {
        self.with_query(
            self.query
                .ordered_by(address::TABLE, address::DISTRICT, direction),
        )
    }

    pub fn ids(&self) -> IdQuery<Address> {
        IdQuery {
            query: self.query.clone(),
            table: self.db.addresses(),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.query.count(&*read(&self.db.addresses)?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.query.is_empty(&*read(&self.db.addresses)?)
    }

    pub fn fetch(&self) -> StoreResult<Vec<Address>> {
        let table = read(&self.db.addresses)?;
        let addresses = self.query.iter(&table)?.cloned().collect();
        Ok(addresses)
    }

    pub fn delete(&self) -> StoreResult<usize> {
        self.query.delete(&mut *write(&self.db.addresses)?)
    }
}

impl<R: Record> IdQuery<R> {
    pub fn collect(&self) -> StoreResult<Vec<RowId>> {
        //! The selected ids, ordered like the query they came from.

        self.query.ids(&*read(&self.table)?)
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.query.count(&*read(&self.table)?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.query.is_empty(&*read(&self.table)?)
    }
}

impl<R: Record + Send + Sync> KeySource for IdQuery<R> {
    fn keys(&self) -> StoreResult<IdentitySet<RowId>> {
        self.query.resolve(&*read(&self.table)?)
    }
}
