use std::collections::HashMap;
use std::fmt::Display;

use indexmap::IndexMap;
use log::{debug, warn};

use super::{
    ColumnIndex, Direction, IdentitySet, Record, RowId, Schema, StoreError, StoreResult, Value,
};

/// A table of uniquely keyed rows with every indexed column kept in a
/// [`ColumnIndex`].
///
/// The table owns the canonical copy of each row. Whatever goes through
/// [`Table::add_row`], [`Table::update_row`] or [`Table::delete_row`] is
/// reflected in every index before the call returns, so a row is never seen
/// half indexed.
///
/// [`Table`] is the dumb class: it has no locks of its own. Whoever shares it
/// wraps it, the way [`crate::accounts::Database`] keeps it behind an
/// [`std::sync::RwLock`].
pub struct Table<R: Record> {
    name: String,
    schema: Schema<R>,
    rows: HashMap<RowId, R>,
    all_ids: IdentitySet<RowId>,
    indices: IndexMap<&'static str, ColumnIndex>,
}

impl<R: Record> Table<R> {
    pub fn new(name: &str, excluded_columns: &[&str]) -> StoreResult<Table<R>> {
        //! Return a new empty table for rows of type `R`. Every column of `R`
        //! is indexed unless its name is in `excluded_columns`; the id column
        //! never is.
        //!
        //! Returns an owned [Table] object.

        let schema = Schema::<R>::from_record(excluded_columns)?;
        let indices = schema
            .indexed_columns()
            .map(|column| (column.name(), ColumnIndex::new(column.name())))
            .collect();

        Ok(Table {
            name: name.to_string(),
            schema,
            rows: HashMap::new(),
            all_ids: IdentitySet::new(),
            indices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    pub fn add_row(&mut self, row: R) -> StoreResult<()> {
        //! Insert a row and add its values to every index.
        //!
        //! Returns [`StoreError::DuplicateKey`] without touching the table if
        //! a row with the same id is already present.

        let id = row.id();
        if self.rows.contains_key(&id) {
            warn!("rejected duplicate key {} on table {}", id, self.name);
            return Err(StoreError::DuplicateKey(id));
        }

        for column in self.schema.indexed_columns() {
            if let Some(index) = self.indices.get_mut(column.name()) {
                index.add(column.get(&row), id);
            }
        }
        self.all_ids.add(id);
        self.rows.insert(id, row);

        debug!("inserted row {} into table {}", id, self.name);
        Ok(())
    }

    pub fn update_row(&mut self, id: &RowId, assignments: Vec<(&str, Value)>) -> StoreResult<()> {
        //! Set the given columns of the row to new values and move the row
        //! between index buckets accordingly.
        //!
        //! - The id column cannot be assigned.
        //! - Updating a row that does not exist does nothing.
        //! - All assignments are checked on a copy first, so a rejected value
        //! leaves both the row and the indices as they were.

        if let Some((column, _)) = assignments
            .iter()
            .find(|(column, _)| *column == R::ID_COLUMN)
        {
            return Err(StoreError::InvalidArgument(format!(
                "change of {} column was requested on table {}, which is illegal",
                column, self.name
            )));
        }

        let Some(current) = self.rows.get(id) else {
            debug!("update of missing row {} on table {} ignored", id, self.name);
            return Ok(());
        };

        let mut updated = current.clone();
        for (column_name, value) in assignments.iter() {
            let info = self.schema.get(column_name).ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "invalid column {}: does not exist on table {}",
                    column_name, self.name
                ))
            })?;
            info.column().set(&mut updated, value.clone())?;
        }

        for column in self.schema.indexed_columns() {
            if !assignments.iter().any(|(name, _)| *name == column.name()) {
                continue;
            }

            let old_value = column.get(current);
            let new_value = column.get(&updated);
            if old_value == new_value {
                continue;
            }

            if let Some(index) = self.indices.get_mut(column.name()) {
                index.remove(&old_value, id)?;
                index.add(new_value, *id);
            }
        }
        self.rows.insert(*id, updated);

        debug!("updated row {} on table {}", id, self.name);
        Ok(())
    }

    pub fn delete_row(&mut self, id: &RowId) -> Option<R> {
        //! Remove the row from the table and all indices.
        //!
        //! Returns the removed row, or [`None`] if there was no such row.

        let row = self.rows.remove(id)?;

        for column in self.schema.indexed_columns() {
            if let Some(index) = self.indices.get_mut(column.name()) {
                // The bucket exists as long as the row did.
                if let Err(error) = index.remove(&column.get(&row), id) {
                    warn!("index out of sync on table {}: {}", self.name, error);
                    debug_assert!(false, "row {} missing from index {}", id, column.name());
                }
            }
        }
        if let Err(error) = self.all_ids.remove(id) {
            warn!("id set out of sync on table {}: {}", self.name, error);
            debug_assert!(false, "row {} missing from the id set", id);
        }

        debug!("deleted row {} from table {}", id, self.name);
        Some(row)
    }

    pub fn get_by_id(&self, id: &RowId) -> StoreResult<&R> {
        self.rows.get(id).ok_or_else(|| {
            StoreError::NotFound(format!("row {} does not exist on table {}", id, self.name))
        })
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.rows.contains_key(id)
    }

    pub fn ids(&self) -> &IdentitySet<RowId> {
        //! All row ids, in insertion order.

        &self.all_ids
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index(&self, column: &str) -> StoreResult<&ColumnIndex> {
        self.indices.get(column).ok_or_else(|| {
            StoreError::InvalidArgument(format!(
                "invalid column {}: not an indexed column of table {}",
                column, self.name
            ))
        })
    }

    pub fn indices(&self) -> impl Iterator<Item = &ColumnIndex> {
        self.indices.values()
    }

    pub fn get_ids_by_column(&self, column: &str, value: &Value) -> StoreResult<&IdentitySet<RowId>> {
        //! Get the ids of all rows whose `column` holds `value`.
        //!
        //! Returns an empty set if there are none, and an error if `column` is
        //! not indexed.

        Ok(self.index(column)?.get(value))
    }

    pub fn get_ids_ordered_by_column(
        &self,
        column: &str,
        direction: Direction,
    ) -> StoreResult<Box<dyn Iterator<Item = &RowId> + '_>> {
        //! Lazily walk the ids of all rows sorted by the value of `column`.

        Ok(Box::new(self.index(column)?.ids(direction)))
    }
}

impl<R: Record> Display for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .all_ids
            .iter()
            .filter_map(|id| self.rows.get(id).map(|row| (id, row)))
            .map(|(id, row)| {
                let values: Vec<String> = self
                    .schema
                    .columns()
                    .map(|info| info.column().get(row).to_string())
                    .collect();
                format!("{} | {}", id, values.join(" | "))
            })
            .collect();

        writeln!(
            f,
            "{}\n{} | {}\n{}",
            self.name,
            R::ID_COLUMN,
            self.schema,
            rows.join("\n")
        )
    }
}
