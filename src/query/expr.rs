use std::fmt::Display;
use std::sync::Arc;

use log::debug;

use crate::persistence::{IdentitySet, Record, RowId, StoreResult, Table, Value};

/// Anything that can produce a set of foreign keys on demand.
///
/// This is the seam the cross-table relationship filter goes through: the
/// home table only knows the name of the column holding foreign keys, and
/// asks the source for the keys to look up when the query is evaluated.
pub trait KeySource: Send + Sync {
    fn keys(&self) -> StoreResult<IdentitySet<RowId>>;
}

/// The deferred id-set computation of a [`super::Query`].
///
/// Every node is a pure function of the current state of the table it is
/// evaluated against. Sub-trees are shared between queries, which is why the
/// children sit behind an [`Arc`].
#[derive(Clone)]
pub enum Expr {
    /// Every row of the table.
    All,
    ById(RowId),
    ByColumn { column: String, value: Value },
    /// Rows of the left side that are also on the right, in the order of
    /// the left side. A left side of [`Expr::All`] is never walked: the
    /// right side is taken as is, in its own order.
    Intersect(Arc<Expr>, Arc<Expr>),
    /// Rows whose `column` holds any of the keys of the source, bucket by
    /// bucket in the order of the keys.
    Join {
        column: String,
        keys: Arc<dyn KeySource>,
    },
}

impl Expr {
    pub fn evaluate<R: Record>(&self, table: &Table<R>) -> StoreResult<IdentitySet<RowId>> {
        match self {
            Expr::All => Ok(table.ids().clone()),
            Expr::ById(id) => Ok(table.contains(id).then_some(*id).into_iter().collect()),
            Expr::ByColumn { column, value } => Ok(table.get_ids_by_column(column, value)?.clone()),
            Expr::Intersect(left, right) => match left.as_ref() {
                // Every bucket is a subset of the table ids.
                Expr::All => right.evaluate(table),
                left => right.restrict(left.evaluate(table)?, table),
            },
            Expr::Join { column, keys } => {
                // Fail on a bad column even when there is nothing to look up.
                let index = table.index(column)?;
                let keys = keys.keys()?;
                debug!(
                    "joining {} foreign keys on {}.{}",
                    keys.len(),
                    table.name(),
                    column
                );

                let mut result = IdentitySet::new();
                for key in keys.iter() {
                    result.extend_from(index.get(&Value::Key(*key)));
                }
                Ok(result)
            }
        }
    }

    fn restrict<R: Record>(
        &self,
        ids: IdentitySet<RowId>,
        table: &Table<R>,
    ) -> StoreResult<IdentitySet<RowId>> {
        //! Intersect `ids` with the set this node evaluates to, borrowing the
        //! index bucket instead of copying it where possible.

        match self {
            Expr::All => Ok(ids.intersection(table.ids())),
            Expr::ById(id) => Ok(ids.contains(id).then_some(*id).into_iter().collect()),
            Expr::ByColumn { column, value } => {
                Ok(ids.intersection(table.get_ids_by_column(column, value)?))
            }
            other => Ok(ids.intersection(&other.evaluate(table)?)),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::All => write!(f, "*"),
            Expr::ById(id) => write!(f, "id = {}", id),
            Expr::ByColumn { column, value } => write!(f, "{} = {}", column, value),
            Expr::Intersect(left, right) => write!(f, "({}) AND ({})", left, right),
            Expr::Join { column, .. } => write!(f, "{} IN (..)", column),
        }
    }
}
