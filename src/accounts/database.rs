use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;
use uuid::Uuid;

use crate::persistence::{Record, RowId, StoreError, StoreResult, Table};

use super::models::{Address, User, address, user};
use super::queries::{AddressQuery, UserQuery};

/// The collective of the users and addresses tables.
///
/// A [`Database`] is the smart class: it checks that a user's address exists
/// before inserting it and hands out queries over its tables. [`Table`] is
/// the dumb class that only knows how to keep its rows and indices in sync.
///
/// Each table sits behind its own [`Arc<RwLock<Table>>`] so the handles can
/// be cloned into queries. Cloning the [`Database`] itself is cheap and
/// shares the same tables.
///
/// # Issues
/// - Deleting an address does not cascade to the users living there; their
/// `address` keys simply stop matching any district.
#[derive(Clone)]
pub struct Database {
    pub(super) users: Arc<RwLock<Table<User>>>,
    pub(super) addresses: Arc<RwLock<Table<Address>>>,
}

impl Database {
    pub fn new() -> StoreResult<Database> {
        //! Create a new database with empty tables. The login counter of a
        //! user is not indexed.

        let users = Table::new(user::TABLE, &[user::LOGIN_COUNTER])?;
        let addresses = Table::new(address::TABLE, &[])?;

        Ok(Database {
            users: Arc::new(RwLock::new(users)),
            addresses: Arc::new(RwLock::new(addresses)),
        })
    }

    pub fn create_address(&self, street: &str, district: &str) -> StoreResult<Address> {
        let address = Address {
            id: Uuid::new_v4(),
            street: street.to_string(),
            district: district.to_string(),
        };
        write(&self.addresses)?.add_row(address.clone())?;
        Ok(address)
    }

    pub fn create_user(&self, name: &str, address: RowId) -> StoreResult<User> {
        //! Insert a new user with a login counter of 0.
        //!
        //! The `address` must be the id of an existing address.

        if !read(&self.addresses)?.contains(&address) {
            return Err(StoreError::NotFound(format!(
                "address {} does not exist on table {}",
                address,
                address::TABLE
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address,
            login_counter: 0,
        };
        write(&self.users)?.add_row(user.clone())?;
        Ok(user)
    }

    pub fn get_users(&self) -> UserQuery {
        //! An unfiltered query over all users.

        UserQuery::new(self.clone())
    }

    pub fn get_addresses(&self) -> AddressQuery {
        AddressQuery::new(self.clone())
    }

    pub fn users(&self) -> Arc<RwLock<Table<User>>> {
        Arc::clone(&self.users)
    }

    pub fn addresses(&self) -> Arc<RwLock<Table<Address>>> {
        Arc::clone(&self.addresses)
    }

    pub fn log_sizes(&self) -> StoreResult<()> {
        info!(
            "database holds {} user(s) and {} address(es)",
            read(&self.users)?.len(),
            read(&self.addresses)?.len()
        );
        Ok(())
    }
}

pub(super) fn read<R: Record>(table: &RwLock<Table<R>>) -> StoreResult<RwLockReadGuard<'_, Table<R>>> {
    table
        .read()
        .map_err(|poisoned| StoreError::Poisoned(poisoned.get_ref().name().to_string()))
}

pub(super) fn write<R: Record>(
    table: &RwLock<Table<R>>,
) -> StoreResult<RwLockWriteGuard<'_, Table<R>>> {
    table
        .write()
        .map_err(|poisoned| StoreError::Poisoned(poisoned.get_ref().name().to_string()))
}
