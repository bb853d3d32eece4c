//! # kindtable
//!
//! This crate provides a small embeddable table keyed by integers or strings and holding
//! integer, float, string or opaque-handle values. Each table declares its key and value kinds
//! up front and rejects entries that do not match. Keys are found by a linear scan; inserting a
//! key that already exists keeps the old entry and chains the new one behind it, so every value
//! stored under a key can be walked in insertion order.
//!
//! Tables are either static (a fixed number of slots) or dynamic (growing one slot at a time
//! when full). Chain links are positions into the table rather than references, so growth and
//! [`Table::shrink`] never break them.
//!
//! ```rust
//! use kindtable::{Entry, KeyKind, Table, TableError, ValueKind};
//!
//! let mut table = Table::allocate(2, KeyKind::Text, ValueKind::Integer).unwrap();
//! table.insert(Entry::new("a", 1)).unwrap();
//! table.insert(Entry::new("a", 2)).unwrap();
//! assert_eq!(
//!     table.insert(Entry::new("b", 3)),
//!     Err(TableError::OutOfCapacity { capacity: 2 })
//! );
//! assert_eq!(table.lookup_chain(&"a".into()).count(), 2);
//! ```

pub mod config;
pub mod debug;
pub mod entry;
pub mod error;
pub mod kind;
pub mod table;

pub use config::{TableConfig, TableConfigBuilder};
pub use entry::{Entry, EntryIndex};
pub use error::{Result, TableError};
pub use kind::{Key, KeyKind, OpaqueHandle, Value, ValueKind};
pub use table::{Chain, Table};
