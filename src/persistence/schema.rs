use std::collections::HashSet;
use std::fmt::Display;

use log::warn;

use super::{RowId, StoreError, StoreResult, Value};

/// Reads the value of one field out of a row.
pub type Getter<R> = fn(&R) -> Value;

/// Writes a value into one field of a row, rejecting values of the wrong
/// type.
pub type Setter<R> = fn(&mut R, Value) -> StoreResult<()>;

/// A typed accessor and mutator pair for one field of a row type.
///
/// Row types hand a list of these to the [`super::Table`] so it can keep its
/// indices in sync without knowing anything else about the row.
pub struct Column<R> {
    name: &'static str,
    get: Getter<R>,
    set: Setter<R>,
}

impl<R> Column<R> {
    pub fn new(name: &'static str, get: Getter<R>, set: Setter<R>) -> Column<R> {
        Column { name, get, set }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, row: &R) -> Value {
        (self.get)(row)
    }

    pub fn set(&self, row: &mut R, value: Value) -> StoreResult<()> {
        (self.set)(row, value)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Column {
            name: self.name,
            get: self.get,
            set: self.set,
        }
    }
}

/// A row type that can be stored in a [`super::Table`].
///
/// The id is the one field that is not described by a [`Column`]: it is fixed
/// at insertion and never indexed.
pub trait Record: Clone {
    /// The name under which the id field is known to callers.
    const ID_COLUMN: &'static str = "id";

    fn id(&self) -> RowId;

    /// Every data field of the row type, in declaration order.
    fn columns() -> Vec<Column<Self>>;
}

pub struct ColumnInformation<R> {
    pub(super) column: Column<R>,
    pub(super) indexed: bool,
}

impl<R> ColumnInformation<R> {
    pub fn column(&self) -> &Column<R> {
        &self.column
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }
}

/// The registration of a row type with a table: its columns and which of
/// them are indexed.
pub struct Schema<R>(Vec<ColumnInformation<R>>);

impl<R: Record> Schema<R> {
    pub fn from_record(excluded_columns: &[&str]) -> StoreResult<Schema<R>> {
        //! Build the schema of `R`, indexing every column except the id column
        //! and the ones in `excluded_columns`.
        //!
        //! Returns an error if `R` declares the same column twice.

        let columns = R::columns();
        let mut seen = HashSet::new();

        for column in columns.iter() {
            if !seen.insert(column.name()) {
                return Err(StoreError::InvalidArgument(format!(
                    "invalid column {}: declared more than once",
                    column.name()
                )));
            }
        }

        for excluded in excluded_columns {
            let known = columns.iter().any(|column| column.name() == *excluded);
            if !known && *excluded != R::ID_COLUMN {
                warn!("excluded column {} does not exist, ignoring it", excluded);
            }
        }

        let schema = columns
            .into_iter()
            .map(|column| {
                let indexed = column.name() != R::ID_COLUMN
                    && !excluded_columns.contains(&column.name());
                ColumnInformation { column, indexed }
            })
            .collect();

        Ok(Schema(schema))
    }
}

impl<R> Schema<R> {
    pub fn get(&self, column_name: &str) -> Option<&ColumnInformation<R>> {
        self.0.iter().find(|info| info.column.name() == column_name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnInformation<R>> {
        self.0.iter()
    }

    pub fn indexed_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.0
            .iter()
            .filter(|info| info.indexed)
            .map(|info| &info.column)
    }

    pub fn is_indexed(&self, column_name: &str) -> bool {
        self.get(column_name).is_some_and(|info| info.indexed)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<R> Display for Schema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .0
            .iter()
            .map(|info| {
                if info.indexed {
                    format!("{} (idx)", info.column.name())
                } else {
                    info.column.name().to_string()
                }
            })
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}
