use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: i64, len: usize },
}

/// A stored value. JSON `null` bodies are kept as `None`.
pub type Item = Option<String>;

/// How `PUT /api/{resource}/{id}` rewrites the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceStrategy {
    /// Overwrite the item at the index. The length never changes.
    #[default]
    InPlace,
    /// Insert the new value at the index, then remove whatever sits at that
    /// index afterwards. The removed item is the value just inserted, so a
    /// valid call leaves the sequence untouched. Accepts `index == len`.
    InsertThenRemove,
}

/// An ordered, in-memory sequence of optional strings addressed by position.
///
/// Duplicates are allowed and an item has no identity beyond its index.
/// Every operation holds the lock for its whole duration.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
    replace: ReplaceStrategy,
}

impl ItemStore {
    /// Create an empty store that replaces items in place.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(replace: ReplaceStrategy) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            replace,
        }
    }

    pub fn replace_strategy(&self) -> ReplaceStrategy {
        self.replace
    }

    /// Snapshot of the current sequence, in order.
    pub fn list(&self) -> Vec<Item> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get the item at `index`.
    pub fn get(&self, index: i64) -> Result<Item, StoreError> {
        let items = self.read();
        let i = checked_index(index, items.len())?;
        Ok(items[i].clone())
    }

    /// Append `value` as the new last item.
    pub fn append(&self, value: Item) {
        let mut items = self.write();
        items.push(value);
        tracing::debug!(len = items.len(), "item appended");
    }

    /// Replace the item at `index` according to this store's [`ReplaceStrategy`].
    pub fn replace(&self, index: i64, value: Item) -> Result<(), StoreError> {
        let mut items = self.write();
        match self.replace {
            ReplaceStrategy::InPlace => {
                let i = checked_index(index, items.len())?;
                items[i] = value;
            }
            ReplaceStrategy::InsertThenRemove => {
                // Insert accepts one past the end.
                let i = checked_index(index, items.len() + 1).map_err(|_| {
                    StoreError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    }
                })?;
                items.insert(i, value);
                items.remove(i);
            }
        }
        tracing::debug!(index, strategy = ?self.replace, "item replaced");
        Ok(())
    }

    /// Remove the item at `index`, shifting later items left.
    pub fn remove(&self, index: i64) -> Result<Item, StoreError> {
        let mut items = self.write();
        let i = checked_index(index, items.len())?;
        let removed = items.remove(i);
        tracing::debug!(index, len = items.len(), "item removed");
        Ok(removed)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Convert a signed request index into a position below `len`.
fn checked_index(index: i64, len: usize) -> Result<usize, StoreError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(StoreError::IndexOutOfRange { index, len })
}
