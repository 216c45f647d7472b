//! Copy-on-write transaction storage.
//!
//! Every transaction runs against an [`OverlayStorage`] layered over the
//! committed ledger store. Writes and deletes are buffered; on success the
//! buffered [`StorageChanges`] are applied in one pass, on failure the
//! overlay is dropped and the ledger is untouched.

use std::collections::BTreeMap;
use std::ops::Bound;

use cosmwasm_std::{Order, Record, Storage};

/// Buffered writes over a read-only base store.
pub struct OverlayStorage<'a> {
    base: &'a dyn Storage,
    /// `None` marks a deletion.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> OverlayStorage<'a> {
    pub fn new(base: &'a dyn Storage) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Release the base borrow, keeping only the buffered writes.
    pub fn into_changes(self) -> StorageChanges {
        StorageChanges {
            ops: self.pending,
        }
    }
}

impl Storage for OverlayStorage<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(value) => value.clone(),
            None => self.base.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Box::new(std::iter::empty());
            }
        }

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.range(start, end, Order::Ascending).collect();

        let bounds = (
            start.map_or(Bound::Unbounded, |s| Bound::Included(s.to_vec())),
            end.map_or(Bound::Unbounded, |e| Bound::Excluded(e.to_vec())),
        );
        for (key, value) in self.pending.range(bounds) {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        match order {
            Order::Ascending => Box::new(merged.into_iter()),
            Order::Descending => Box::new(merged.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }
}

/// Writes produced by a successful transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StorageChanges {
    ops: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl StorageChanges {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn apply(self, target: &mut dyn Storage) {
        for (key, value) in self.ops {
            match value {
                Some(value) => target.set(&key, &value),
                None => target.remove(&key),
            }
        }
    }
}
