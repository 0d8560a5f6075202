//! The lazy query algebra over a [`Table`].
//!
//! A [`Query`] is a small expression tree plus an optional ordering
//! directive. Building one is cheap and touches no table at all; only
//! [`Query::resolve`], [`Query::count`], iteration, or one of the bulk
//! mutators evaluates the tree, and it does so against the state the table is
//! in at that moment. Queries are live views, never snapshots.
//!
//! Each filter returns a new [`Query`] that shares the tree of its parent.
//! Independent filters commute: `q.with_column(a).with_column(b)` selects the
//! same ids as `q.with_column(b).with_column(a)`.

mod expr;

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;

pub use expr::{Expr, KeySource};

use crate::persistence::{
    Direction, IdentitySet, Record, RowId, StoreError, StoreResult, Table, Value,
};

/// Which column of which table the results are walked by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ordering {
    pub table: String,
    pub column: String,
    pub direction: Direction,
}

impl Ordering {
    fn check<R: Record>(&self, table: &Table<R>) -> StoreResult<()> {
        if self.table != table.name() {
            return Err(StoreError::InvalidArgument(format!(
                "ordering on table {} cannot be applied to table {}",
                self.table,
                table.name()
            )));
        }
        Ok(())
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} {}", self.table, self.column, self.direction)
    }
}

pub struct Query<R> {
    expr: Arc<Expr>,
    ordering: Option<Ordering>,
    _rows: PhantomData<fn() -> R>,
}

impl<R> Clone for Query<R> {
    fn clone(&self) -> Self {
        Query {
            expr: Arc::clone(&self.expr),
            ordering: self.ordering.clone(),
            _rows: PhantomData,
        }
    }
}

impl<R: Record> Default for Query<R> {
    fn default() -> Self {
        Query::all()
    }
}

impl<R: Record> Query<R> {
    pub fn all() -> Query<R> {
        //! A query over every row of the table, in insertion order.

        Query {
            expr: Arc::new(Expr::All),
            ordering: None,
            _rows: PhantomData,
        }
    }

    fn narrowed(&self, filter: Expr) -> Query<R> {
        Query {
            expr: Arc::new(Expr::Intersect(Arc::clone(&self.expr), Arc::new(filter))),
            ordering: self.ordering.clone(),
            _rows: PhantomData,
        }
    }

    pub fn with_id(&self, id: RowId) -> Query<R> {
        self.narrowed(Expr::ById(id))
    }

    pub fn with_column(&self, column: &str, value: impl Into<Value>) -> Query<R> {
        //! Keep the rows whose indexed `column` holds `value`.

        self.narrowed(Expr::ByColumn {
            column: column.to_string(),
            value: value.into(),
        })
    }

    pub fn joined_on(&self, column: &str, keys: Arc<dyn KeySource>) -> Query<R> {
        //! Keep the rows whose `column` holds one of the foreign keys `keys`
        //! resolves to at evaluation time.

        self.narrowed(Expr::Join {
            column: column.to_string(),
            keys,
        })
    }

    pub fn ordered_by(&self, table: &str, column: &str, direction: Direction) -> Query<R> {
        //! Same rows, walked by the value of `column`. This replaces any
        //! previous ordering.

        Query {
            expr: Arc::clone(&self.expr),
            ordering: Some(Ordering {
                table: table.to_string(),
                column: column.to_string(),
                direction,
            }),
            _rows: PhantomData,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn ordering(&self) -> Option<&Ordering> {
        self.ordering.as_ref()
    }

    pub fn resolve(&self, table: &Table<R>) -> StoreResult<IdentitySet<RowId>> {
        //! Evaluate the filters against the current state of `table`.
        //!
        //! The ordering directive is not applied; the set follows insertion
        //! order.

        debug!("evaluating {} on table {}", self, table.name());
        self.expr.evaluate(table)
    }

    pub fn ids(&self, table: &Table<R>) -> StoreResult<Vec<RowId>> {
        //! The matching ids, ordered by the directive if there is one.

        let ids = self.resolve(table)?;
        match &self.ordering {
            Some(ordering) => {
                ordering.check(table)?;
                Ok(table
                    .get_ids_ordered_by_column(&ordering.column, ordering.direction)?
                    .filter(|id| ids.contains(*id))
                    .copied()
                    .collect())
            }
            None => Ok(ids.into_iter().collect()),
        }
    }

    pub fn iter<'t>(&self, table: &'t Table<R>) -> StoreResult<Box<dyn Iterator<Item = &'t R> + 't>> {
        //! Lazily yield the matching rows, ordered by the directive if there
        //! is one.

        let ids = self.resolve(table)?;
        match &self.ordering {
            Some(ordering) => {
                ordering.check(table)?;
                let ordered = table.get_ids_ordered_by_column(&ordering.column, ordering.direction)?;
                Ok(Box::new(
                    ordered
                        .filter(move |id| ids.contains(*id))
                        .filter_map(move |id| table.get_by_id(id).ok()),
                ))
            }
            None => Ok(Box::new(
                ids.into_iter()
                    .filter_map(move |id| table.get_by_id(&id).ok()),
            )),
        }
    }

    pub fn count(&self, table: &Table<R>) -> StoreResult<usize> {
        Ok(self.resolve(table)?.len())
    }

    pub fn is_empty(&self, table: &Table<R>) -> StoreResult<bool> {
        Ok(self.resolve(table)?.is_empty())
    }

    pub fn delete(&self, table: &mut Table<R>) -> StoreResult<usize> {
        //! Delete every matching row.
        //!
        //! The ids are resolved once up front. Returns the number of rows
        //! deleted.

        let ids = self.resolve(table)?;
        let n_deleted = ids
            .iter()
            .filter(|id| table.delete_row(id).is_some())
            .count();

        debug!("deleted {} row(s) from table {}", n_deleted, table.name());
        Ok(n_deleted)
    }

    pub fn update_each<F>(&self, table: &mut Table<R>, mut assign: F) -> StoreResult<usize>
    where
        F: FnMut(&R) -> Vec<(&'static str, Value)>,
    {
        //! Call [`Table::update_row`] once for every matching row with the
        //! assignments `assign` computes from the row's current state.
        //!
        //! The ids are resolved once up front. This is not atomic: rows
        //! updated before an error stay updated.

        let ids = self.resolve(table)?;
        let mut n_updated = 0;

        for id in ids.iter() {
            let assignments = match table.get_by_id(id) {
                Ok(row) => assign(row),
                Err(_) => continue,
            };
            table.update_row(id, assignments)?;
            n_updated += 1;
        }

        debug!("updated {} row(s) on table {}", n_updated, table.name());
        Ok(n_updated)
    }
}

impl<R> Display for Query<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ordering {
            Some(ordering) => write!(f, "{} ORDER BY {}", self.expr, ordering),
            None => write!(f, "{}", self.expr),
        }
    }
}
