//! # Table with duplicate-key chaining
//!
//! This module implements a contiguous table of [`Entry`] values under a
//! fixed `(key kind, value kind)` schema. Keys are located by a linear
//! equality scan. Inserting a key that is already present does not replace
//! anything: the new entry is appended and linked onto the tail of the
//! existing entry's chain, so every value ever stored under a key stays
//! reachable in insertion order.
//!
//! Chain links are [`EntryIndex`] positions rather than references, which
//! keeps them valid when the storage grows or shrinks.
//!
//! ## Example
//!
//! ```rust
//! use kindtable::{Entry, KeyKind, Table, ValueKind};
//!
//! let mut table = Table::allocate(100, KeyKind::Integer, ValueKind::Integer).unwrap();
//! table.insert(Entry::new(1, 1)).unwrap();
//! table.insert(Entry::new(1, 2)).unwrap();
//! table.insert(Entry::new(1, 3)).unwrap();
//!
//! let values: Vec<_> = table
//!     .lookup_chain(&1.into())
//!     .map(|e| e.value().to_string())
//!     .collect();
//! assert_eq!(values, ["1", "2", "3"]);
//!
//! table.shrink().unwrap();
//! assert_eq!(table.capacity(), 3);
//! ```

use log::{debug, error, trace, warn};

use crate::config::TableConfig;
use crate::entry::{Entry, EntryIndex};
use crate::error::{Result, TableError};
use crate::kind::{Key, KeyKind, ValueKind};

/// A table of entries sharing one key/value schema.
///
/// `capacity` is the number of slots the table has declared, tracked
/// independently of the backing vector's own capacity. A static table fails
/// inserts once `len() == capacity()`; a dynamic one grows by one slot.
#[derive(Debug)]
pub struct Table {
    key_kind: KeyKind,
    value_kind: ValueKind,
    capacity: usize,
    dynamic: bool,
    storage: Option<Vec<Entry>>,
}

impl Table {
    /// Allocates a static table with room for exactly `capacity` entries.
    pub fn allocate(capacity: usize, key_kind: KeyKind, value_kind: ValueKind) -> Result<Self> {
        Self::alloc(capacity, key_kind, value_kind, false)
    }

    /// Allocates a table that grows one slot at a time once full.
    pub fn allocate_dynamic(
        capacity: usize,
        key_kind: KeyKind,
        value_kind: ValueKind,
    ) -> Result<Self> {
        Self::alloc(capacity, key_kind, value_kind, true)
    }

    /// Allocates a table described by a validated [`TableConfig`].
    pub fn with_config(config: &TableConfig) -> Result<Self> {
        config.validate()?;
        Self::alloc(
            config.initial_capacity,
            config.key_kind,
            config.value_kind,
            config.dynamic,
        )
    }

    fn alloc(
        capacity: usize,
        key_kind: KeyKind,
        value_kind: ValueKind,
        dynamic: bool,
    ) -> Result<Self> {
        if capacity > EntryIndex::MAX_ENTRIES {
            error!("table allocation of {} slots exceeds index range", capacity);
            return Err(TableError::AllocationFailure {
                requested: capacity,
            });
        }
        let mut storage: Vec<Entry> = Vec::new();
        if storage.try_reserve_exact(capacity).is_err() {
            error!("table allocation of {} slots failed", capacity);
            return Err(TableError::AllocationFailure {
                requested: capacity,
            });
        }
        debug!(
            "allocated table <{}, {}> capacity={} dynamic={}",
            key_kind, value_kind, capacity, dynamic
        );
        Ok(Self {
            key_kind,
            value_kind,
            capacity,
            dynamic,
            storage: Some(storage),
        })
    }

    /// Releases the storage and resets capacity and length to zero.
    ///
    /// Releasing an already released table fails with
    /// [`TableError::InvalidArgument`] and changes nothing.
    pub fn release(&mut self) -> Result<()> {
        match self.storage.take() {
            Some(storage) => {
                debug!(
                    "released table <{}, {}> len={} capacity={}",
                    self.key_kind,
                    self.value_kind,
                    storage.len(),
                    self.capacity
                );
                self.capacity = 0;
                Ok(())
            }
            None => Err(TableError::released("release")),
        }
    }

    #[inline]
    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Returns the number of declared slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns `true` once [`release`](Self::release) has run.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.storage.is_none()
    }

    pub fn is_full(&self) -> Result<bool> {
        match &self.storage {
            Some(storage) => Ok(storage.len() == self.capacity),
            None => Err(TableError::released("is_full")),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        match &self.storage {
            Some(storage) => Ok(storage.is_empty()),
            None => Err(TableError::released("is_empty")),
        }
    }

    /// Returns `true` if `entry` has this table's key and value kinds.
    #[inline]
    pub fn typematch(&self, entry: &Entry) -> bool {
        entry.key_kind() == self.key_kind && entry.value_kind() == self.value_kind
    }

    /// Occupied entries in insertion order. Empty for a released table.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.storage.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries().iter()
    }

    pub fn get(&self, idx: EntryIndex) -> Option<&Entry> {
        self.entries().get(idx.index())
    }

    pub(crate) fn storage_ptr(&self) -> Option<*const Entry> {
        self.storage.as_ref().map(|s| s.as_ptr())
    }

    /// Appends `entry`, chaining it behind any earlier entry with an equal key.
    ///
    /// Returns the position of the new entry. On error the table is left as
    /// it was, except after an [`TableError::AllocationFailure`] during
    /// growth, which leaves it released.
    pub fn insert(&mut self, entry: Entry) -> Result<EntryIndex> {
        if self.storage.is_none() {
            return Err(TableError::released("insert"));
        }
        if !self.typematch(&entry) {
            warn!(
                "key, val type mismatch: table <{}, {}>, entry <{}, {}>",
                self.key_kind,
                self.value_kind,
                entry.key_kind(),
                entry.value_kind()
            );
            return Err(TableError::SchemaMismatch {
                expected_key: self.key_kind,
                expected_value: self.value_kind,
                found_key: entry.key_kind(),
                found_value: entry.value_kind(),
            });
        }
        if self.len() == self.capacity {
            if !self.dynamic {
                return Err(TableError::OutOfCapacity {
                    capacity: self.capacity,
                });
            }
            self.grow()?;
        }

        // Look for an existing chain before the new entry lands in storage.
        let head = self.position(entry.key());

        let storage = self
            .storage
            .as_mut()
            .ok_or_else(|| TableError::released("insert"))?;
        let idx = EntryIndex::new(storage.len());
        storage.push(entry);

        if let Some(head) = head {
            let tail = chain_tail(storage, head);
            trace!("linking {} after {} (chain head {})", idx, tail, head);
            storage[tail.index()].link(idx);
        }
        Ok(idx)
    }

    /// Adds exactly one slot. A failed reservation releases the table.
    fn grow(&mut self) -> Result<()> {
        let requested = self.capacity + 1;
        if requested > EntryIndex::MAX_ENTRIES {
            return Err(TableError::OutOfCapacity {
                capacity: self.capacity,
            });
        }
        let storage = self
            .storage
            .as_mut()
            .ok_or_else(|| TableError::released("insert"))?;
        if storage.try_reserve_exact(1).is_err() {
            error!("growing table to {} slots failed, releasing it", requested);
            self.storage = None;
            self.capacity = 0;
            return Err(TableError::AllocationFailure { requested });
        }
        self.capacity = requested;
        debug!("grew table to capacity={}", self.capacity);
        Ok(())
    }

    /// Position of the first entry whose key equals `key`.
    pub fn position(&self, key: &Key) -> Option<EntryIndex> {
        self.entries()
            .iter()
            .position(|e| e.key() == key)
            .map(EntryIndex::new)
    }

    /// First entry whose key equals `key`; the head of that key's chain.
    pub fn lookup(&self, key: &Key) -> Option<&Entry> {
        self.entries().iter().find(|e| e.key() == key)
    }

    pub fn lookup_int(&self, key: i64) -> Option<&Entry> {
        self.entries().iter().find(|e| e.key().as_int() == Some(key))
    }

    pub fn lookup_text(&self, key: &str) -> Option<&Entry> {
        self.entries()
            .iter()
            .find(|e| e.key().as_text() == Some(key))
    }

    /// Walks the chain starting at `start`, head included.
    pub fn chain(&self, start: EntryIndex) -> Chain<'_> {
        Chain {
            entries: self.entries(),
            next: Some(start),
        }
    }

    /// Every entry stored under `key`, in insertion order.
    pub fn lookup_chain(&self, key: &Key) -> Chain<'_> {
        Chain {
            entries: self.entries(),
            next: self.position(key),
        }
    }

    /// Cuts the declared capacity down to the current length.
    pub fn shrink(&mut self) -> Result<()> {
        let storage = self
            .storage
            .as_mut()
            .ok_or_else(|| TableError::released("shrink"))?;
        if self.capacity != storage.len() {
            debug!(
                "shrinking table from capacity={} to {}",
                self.capacity,
                storage.len()
            );
        }
        storage.shrink_to_fit();
        self.capacity = storage.len();
        Ok(())
    }
}

fn chain_tail(entries: &[Entry], head: EntryIndex) -> EntryIndex {
    let mut tail = head;
    // Links always point forward, so this terminates.
    while let Some(next) = entries[tail.index()].next() {
        tail = next;
    }
    tail
}

/// Iterator over one key's chain.
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    entries: &'a [Entry],
    next: Option<EntryIndex>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.next?.index())?;
        self.next = entry.next();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{OpaqueHandle, Value};

    fn int_table(capacity: usize) -> Table {
        Table::allocate(capacity, KeyKind::Integer, ValueKind::Integer).unwrap()
    }

    #[test]
    fn test_allocate_defaults() {
        let table = int_table(10);
        assert_eq!(table.capacity(), 10);
        assert_eq!(table.len(), 0);
        assert!(!table.is_dynamic());
        assert_eq!(table.is_empty(), Ok(true));
        assert_eq!(table.is_full(), Ok(false));

        let dynamic = Table::allocate_dynamic(0, KeyKind::Text, ValueKind::Opaque).unwrap();
        assert!(dynamic.is_dynamic());
        assert_eq!(dynamic.is_full(), Ok(true));
    }

    #[test]
    fn test_schema_mismatch_is_noop() {
        let mut table = int_table(4);
        let err = table.insert(Entry::new("one", 1)).unwrap_err();
        assert_eq!(
            err,
            TableError::SchemaMismatch {
                expected_key: KeyKind::Integer,
                expected_value: ValueKind::Integer,
                found_key: KeyKind::Text,
                found_value: ValueKind::Integer,
            }
        );
        assert!(table.insert(Entry::new(1, 1.5)).is_err());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_chain_accumulation() {
        let mut table = int_table(100);
        for v in 1..=3 {
            table.insert(Entry::new(1, v)).unwrap();
        }
        let head = table.lookup_int(1).unwrap();
        assert_eq!(head.value(), &Value::Integer(1));
        assert_eq!(head.next(), Some(EntryIndex::new(1)));

        let values: Vec<_> = table.lookup_chain(&Key::Integer(1)).map(|e| e.value().clone()).collect();
        assert_eq!(
            values,
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn test_interleaved_chains() {
        let mut table = Table::allocate(8, KeyKind::Text, ValueKind::Text).unwrap();
        table.insert(Entry::new("a", "a1")).unwrap();
        table.insert(Entry::new("b", "b1")).unwrap();
        table.insert(Entry::new("a", "a2")).unwrap();
        table.insert(Entry::new("b", "b2")).unwrap();
        table.insert(Entry::new("a", "a3")).unwrap();

        let a: Vec<_> = table.lookup_chain(&"a".into()).map(|e| e.value().to_string()).collect();
        let b: Vec<_> = table.lookup_chain(&"b".into()).map(|e| e.value().to_string()).collect();
        assert_eq!(a, ["a1", "a2", "a3"]);
        assert_eq!(b, ["b1", "b2"]);
    }

    #[test]
    fn test_static_overflow() {
        let mut table = int_table(2);
        table.insert(Entry::new(1, 1)).unwrap();
        table.insert(Entry::new(2, 2)).unwrap();
        assert_eq!(
            table.insert(Entry::new(3, 3)),
            Err(TableError::OutOfCapacity { capacity: 2 })
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.is_full(), Ok(true));
    }

    #[test]
    fn test_dynamic_growth() {
        let mut table = Table::allocate_dynamic(0, KeyKind::Integer, ValueKind::Integer).unwrap();
        for i in 0..5 {
            table.insert(Entry::new(i, i * 10)).unwrap();
            assert_eq!(table.capacity(), table.len());
        }
        assert_eq!(table.capacity(), 5);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_text_lookup_matches_equal_key() {
        let mut table = Table::allocate(4, KeyKind::Text, ValueKind::Opaque).unwrap();
        table.insert(Entry::new("alpha", OpaqueHandle(1))).unwrap();
        table.insert(Entry::new("beta", OpaqueHandle(2))).unwrap();
        assert_eq!(
            table.lookup_text("beta").map(|e| e.value().clone()),
            Some(Value::Opaque(OpaqueHandle(2)))
        );
        assert!(table.lookup_text("gamma").is_none());
        assert!(table.lookup_int(1).is_none());
    }

    #[test]
    fn test_lookup_miss() {
        let table = int_table(4);
        assert!(table.lookup_int(0).is_none());
        assert!(table.lookup(&Key::Integer(0)).is_none());
        assert_eq!(table.lookup_chain(&Key::Integer(0)).count(), 0);
    }

    #[test]
    fn test_shrink() {
        let mut table = int_table(10);
        table.insert(Entry::new(1, 1)).unwrap();
        table.insert(Entry::new(1, 2)).unwrap();
        table.shrink().unwrap();
        assert_eq!(table.capacity(), 2);
        assert_eq!(table.is_full(), Ok(true));
        table.shrink().unwrap();
        assert_eq!(table.capacity(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup_chain(&Key::Integer(1)).count(), 2);
    }

    #[test]
    fn test_release_twice() {
        let mut table = int_table(3);
        table.insert(Entry::new(1, 1)).unwrap();
        assert!(table.release().is_ok());
        assert!(table.is_released());
        assert_eq!(table.capacity(), 0);
        assert_eq!(table.len(), 0);
        assert_eq!(
            table.release(),
            Err(TableError::InvalidArgument { operation: "release" })
        );
        assert_eq!(table.capacity(), 0);
    }

    #[test]
    fn test_released_table_rejects_operations() {
        let mut table = int_table(3);
        table.release().unwrap();
        assert!(matches!(table.is_full(), Err(TableError::InvalidArgument { .. })));
        assert!(matches!(table.is_empty(), Err(TableError::InvalidArgument { .. })));
        assert!(matches!(
            table.insert(Entry::new(1, 1)),
            Err(TableError::InvalidArgument { .. })
        ));
        assert!(matches!(table.shrink(), Err(TableError::InvalidArgument { .. })));
        assert!(table.lookup_int(1).is_none());
    }

    #[test]
    fn test_with_config() {
        let config = TableConfig::builder()
            .initial_capacity(2)
            .key_kind(KeyKind::Text)
            .value_kind(ValueKind::Float)
            .dynamic(false)
            .build()
            .unwrap();
        let mut table = Table::with_config(&config).unwrap();
        assert_eq!(table.capacity(), 2);
        assert!(!table.is_dynamic());
        table.insert(Entry::new("x", 0.5)).unwrap();
        assert_eq!(table.key_kind(), KeyKind::Text);
        assert_eq!(table.value_kind(), ValueKind::Float);
    }
}
