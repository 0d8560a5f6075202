use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;

use super::{IdentitySet, StoreError, StoreResult};

/// The order in which distinct keys are walked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };
        write!(f, "{}", direction)
    }
}

/// A sorted map from a comparable key to the set of identifiers stored
/// under it.
///
/// Many identifiers may share a key. A key only lives as long as its set is
/// non-empty: the first identifier creates the entry and removing the last
/// one drops it, so churn never leaves stale keys behind for ordered walks
/// to trip over.
#[derive(Clone, Debug)]
pub struct OrderedMultiset<K: Ord, T: Hash + Eq> {
    entries: BTreeMap<K, IdentitySet<T>>,
    n_items: usize,
}

impl<K: Ord, T: Hash + Eq> Default for OrderedMultiset<K, T> {
    fn default() -> Self {
        OrderedMultiset {
            entries: BTreeMap::new(),
            n_items: 0,
        }
    }
}

impl<K: Ord + Clone, T: Hash + Eq + Clone> OrderedMultiset<K, T> {
    pub fn new() -> OrderedMultiset<K, T> {
        OrderedMultiset::default()
    }

    pub fn add(&mut self, key: K, item: T) -> bool {
        //! Store `item` under `key`, creating the key's entry if this is its
        //! first item.
        //!
        //! Returns `false` if the pair was already present.

        let inserted = self.entries.entry(key).or_default().add(item);
        if inserted {
            self.n_items += 1;
        }
        inserted
    }

    pub fn remove(&mut self, key: &K, item: &T) -> StoreResult<()> {
        //! Remove the pair, dropping the key entirely once it has no items
        //! left.

        let items = self.entries.get_mut(key).ok_or_else(|| {
            StoreError::NotFound("key is not present in the multiset".to_string())
        })?;
        items.remove(item)?;
        self.n_items -= 1;

        if items.is_empty() {
            self.entries.remove(key);
        }
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&IdentitySet<T>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self, direction: Direction) -> Box<dyn Iterator<Item = &K> + '_> {
        //! Distinct keys in comparator order, or the reverse of it.

        match direction {
            Direction::Ascending => Box::new(self.entries.keys()),
            Direction::Descending => Box::new(self.entries.keys().rev()),
        }
    }

    pub fn entries(
        &self,
        direction: Direction,
    ) -> Box<dyn Iterator<Item = (&K, &IdentitySet<T>)> + '_> {
        match direction {
            Direction::Ascending => Box::new(self.entries.iter()),
            Direction::Descending => Box::new(self.entries.iter().rev()),
        }
    }

    pub fn n_keys(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        //! Total number of stored `(key, item)` pairs.

        self.n_items
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
