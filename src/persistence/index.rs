use super::{Direction, IdentitySet, OrderedMultiset, RowId, StoreResult, Value};

/// A per-column index to find rows by the value of one field quickly.
///
/// Every distinct value of the column maps to the [`IdentitySet`] of row ids
/// currently holding it. The values are kept sorted, so the same structure
/// answers both equality lookups and ordered walks of the column.
///
/// # Issues
/// - The index is NOT multi-thread compatible on its own. The owner of the
/// [`super::Table`] has to put a lock around it before sharing it.
#[derive(Clone, Debug)]
pub struct ColumnIndex {
    column: String,
    values: OrderedMultiset<Value, RowId>,
    // Handed out for lookups of values no row holds.
    empty: IdentitySet<RowId>,
}

impl ColumnIndex {
    pub fn new(column: &str) -> ColumnIndex {
        ColumnIndex {
            column: column.to_string(),
            values: OrderedMultiset::new(),
            empty: IdentitySet::new(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn add(&mut self, value: Value, id: RowId) {
        self.values.add(value, id);
    }

    pub fn remove(&mut self, value: &Value, id: &RowId) -> StoreResult<()> {
        self.values.remove(value, id)
    }

    pub fn get(&self, value: &Value) -> &IdentitySet<RowId> {
        //! Get the ids of the rows holding `value`. The set is empty when no
        //! row does.

        self.values.get(value).unwrap_or(&self.empty)
    }

    pub fn values(&self, direction: Direction) -> impl Iterator<Item = &Value> + '_ {
        self.values.keys(direction)
    }

    pub fn ids(&self, direction: Direction) -> impl Iterator<Item = &RowId> + '_ {
        //! Walk every id of the index, grouped by value in `direction` order.
        //!
        //! Ids sharing a value always come out in the order they were added,
        //! whichever the direction.

        self.values
            .entries(direction)
            .flat_map(|(_, ids)| ids.iter())
    }

    pub fn distinct_values(&self) -> usize {
        self.values.n_keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
