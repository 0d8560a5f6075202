use std::fmt::Display;

use serde::Serialize;

use crate::persistence::{Column, Record, RowId, Value};

pub mod address {
    pub const TABLE: &str = "addresses";
    pub const STREET: &str = "street";
    pub const DISTRICT: &str = "district";
}

pub mod user {
    pub const TABLE: &str = "users";
    pub const NAME: &str = "name";
    pub const ADDRESS: &str = "address";
    pub const LOGIN_COUNTER: &str = "login_counter";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: RowId,
    pub street: String,
    pub district: String,
}

/// A user living at an [`Address`]. The `address` field holds the id of a
/// row in the addresses table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: RowId,
    pub name: String,
    pub address: RowId,
    pub login_counter: i64,
}

impl Record for Address {
    fn id(&self) -> RowId {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::<Self>::new(
                address::STREET,
                |row| Value::from(row.street.as_str()),
                |row, value| {
                    row.street = value.into_text()?;
                    Ok(())
                },
            ),
            Column::<Self>::new(
                address::DISTRICT,
                |row| Value::from(row.district.as_str()),
                |row, value| {
                    row.district = value.into_text()?;
                    Ok(())
                },
            ),
        ]
    }
}

impl Record for User {
    fn id(&self) -> RowId {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::<Self>::new(
                user::NAME,
                |row| Value::from(row.name.as_str()),
                |row, value| {
                    row.name = value.into_text()?;
                    Ok(())
                },
            ),
            Column::<Self>::new(
                user::ADDRESS,
                |row| Value::Key(row.address),
                |row, value| {
                    row.address = value.into_key()?;
                    Ok(())
                },
            ),
            Column::<Self>::new(
                user::LOGIN_COUNTER,
                |row| Value::Integer(row.login_counter),
                |row, value| {
                    row.login_counter = value.into_integer()?;
                    Ok(())
                },
            ),
        ]
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {}", self.id, self.street, self.district)
    }
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.id, self.name, self.address, self.login_counter
        )
    }
}
