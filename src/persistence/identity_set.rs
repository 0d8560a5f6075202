use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexSet;
use indexmap::set::{IntoIter, Iter};
use serde::Serialize;

use super::{StoreError, StoreResult};

/// An insertion-ordered set of identifiers.
///
/// It is the bucket type of every [`super::ColumnIndex`] and the currency the
/// query algebra passes around between filters. Like the registry of the
/// database, it sits on an [`IndexSet`] so the first insertion order always
/// prevails when iterating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentitySet<T: Hash + Eq> {
    items: IndexSet<T>,
}

impl<T: Hash + Eq> Default for IdentitySet<T> {
    fn default() -> Self {
        IdentitySet {
            items: IndexSet::new(),
        }
    }
}

impl<T: Hash + Eq + Clone> IdentitySet<T> {
    pub fn new() -> IdentitySet<T> {
        IdentitySet::default()
    }

    pub fn with_capacity(capacity: usize) -> IdentitySet<T> {
        IdentitySet {
            items: IndexSet::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, item: T) -> bool {
        //! Add an item at the end of the set.
        //!
        //! Returns `false` if it was already a member, in which case its
        //! position is not changed.

        self.items.insert(item)
    }

    pub fn remove(&mut self, item: &T) -> StoreResult<()> {
        //! Remove an item while keeping the order of the others intact.
        //!
        //! Callers only remove what they know to be there, so a miss is
        //! reported as [`StoreError::NotFound`].

        if self.items.shift_remove(item) {
            Ok(())
        } else {
            Err(StoreError::NotFound(
                "item is not a member of the identity set".to_string(),
            ))
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    pub fn intersection(&self, other: &IdentitySet<T>) -> IdentitySet<T> {
        //! Members of `self` that are also in `other`, in the order of `self`.
        //!
        //! Neither operand is touched.

        let mut result = IdentitySet::with_capacity(self.len().min(other.len()));
        for item in self.items.iter().filter(|item| other.contains(item)) {
            result.items.insert(item.clone());
        }
        result
    }

    pub fn extend_from(&mut self, other: &IdentitySet<T>) {
        //! Union `other` into `self`, appending new members in the order of
        //! `other`.

        self.items.extend(other.items.iter().cloned());
    }
}

impl<T: Hash + Eq> FromIterator<T> for IdentitySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        IdentitySet {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Hash + Eq> IntoIterator for IdentitySet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a IdentitySet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Hash + Eq + Display> Display for IdentitySet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items: Vec<String> = self.items.iter().map(|item| item.to_string()).collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}
