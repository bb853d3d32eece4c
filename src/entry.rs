//! Table entries and the positional links that chain equal keys together.

use std::fmt;

use crate::kind::{Key, KeyKind, Value, ValueKind};

/// Position of an entry inside a table's storage.
///
/// Chains are built from these rather than references, so growing or
/// shrinking the storage never invalidates a link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryIndex {
    index: u32,
}

impl EntryIndex {
    /// Largest number of entries a table can address.
    pub const MAX_ENTRIES: usize = u32::MAX as usize;

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < Self::MAX_ENTRIES);
        Self {
            index: index as u32,
        }
    }

    /// Returns the storage position this index refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for EntryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// One key/value record plus the link to the next entry sharing its key.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    key: Key,
    value: Value,
    chain_next: Option<EntryIndex>,
}

impl Entry {
    /// Builds an entry, inferring its kinds from the key and value supplied.
    ///
    /// ```rust
    /// use kindtable::{Entry, KeyKind, ValueKind};
    ///
    /// let e = Entry::new("half", 0.5f32);
    /// assert_eq!(e.key_kind(), KeyKind::Text);
    /// assert_eq!(e.value_kind(), ValueKind::Float);
    /// assert!(e.next().is_none());
    /// ```
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            chain_next: None,
        }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn key_kind(&self) -> KeyKind {
        self.key.kind()
    }

    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Next entry in this key's chain, if any.
    #[inline]
    pub fn next(&self) -> Option<EntryIndex> {
        self.chain_next
    }

    pub(crate) fn link(&mut self, next: EntryIndex) {
        debug_assert!(self.chain_next.is_none(), "chain link set twice");
        self.chain_next = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::OpaqueHandle;

    #[test]
    fn test_all_combinations() {
        let cases = [
            (Entry::new(1, 1), KeyKind::Integer, ValueKind::Integer),
            (Entry::new(1, 1.0f32), KeyKind::Integer, ValueKind::Float),
            (Entry::new(1, "v"), KeyKind::Integer, ValueKind::Text),
            (Entry::new(1, OpaqueHandle(8)), KeyKind::Integer, ValueKind::Opaque),
            (Entry::new("k", 1), KeyKind::Text, ValueKind::Integer),
            (Entry::new("k", 1.0f64), KeyKind::Text, ValueKind::Float),
            (Entry::new("k", "v"), KeyKind::Text, ValueKind::Text),
            (Entry::new("k", OpaqueHandle(8)), KeyKind::Text, ValueKind::Opaque),
        ];
        for (entry, key_kind, value_kind) in cases {
            assert_eq!(entry.key_kind(), key_kind);
            assert_eq!(entry.value_kind(), value_kind);
            assert_eq!(entry.next(), None);
        }
    }

    #[test]
    fn test_index_display() {
        let idx = EntryIndex::new(3);
        assert_eq!(idx.index(), 3);
        assert_eq!(idx.to_string(), "#3");
    }
}
