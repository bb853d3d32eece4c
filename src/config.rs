//! Table construction parameters.
//!
//! ```rust
//! use kindtable::config::TableConfig;
//! use kindtable::{KeyKind, Table, ValueKind};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TableConfig::builder()
//!     .key_kind(KeyKind::Text)
//!     .value_kind(ValueKind::Float)
//!     .initial_capacity(16)
//!     .dynamic(false)
//!     .build()?;
//! let table = Table::with_config(&config)?;
//! assert_eq!(table.capacity(), 16);
//! # Ok(())
//! # }
//! ```

use crate::entry::EntryIndex;
use crate::error::{Result, TableError};
use crate::kind::{KeyKind, ValueKind};

/// Schema, initial capacity and growth mode for a new table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub key_kind: KeyKind,
    pub value_kind: ValueKind,
    pub dynamic: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            key_kind: KeyKind::Integer,
            value_kind: ValueKind::Integer,
            dynamic: true,
        }
    }
}

impl TableConfig {
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::new()
    }

    /// Checks that the configuration describes a usable table.
    ///
    /// The capacity must be addressable by an [`EntryIndex`], and a static
    /// table needs at least one slot or it could never hold anything.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > EntryIndex::MAX_ENTRIES {
            return Err(TableError::invalid_config(format!(
                "initial_capacity {} exceeds the addressable maximum {}",
                self.initial_capacity,
                EntryIndex::MAX_ENTRIES
            )));
        }
        if !self.dynamic && self.initial_capacity == 0 {
            return Err(TableError::invalid_config(
                "a static table needs a non-zero initial_capacity",
            ));
        }
        Ok(())
    }
}

/// Builder for [`TableConfig`].
#[derive(Clone, Debug, Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
        }
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    pub fn key_kind(mut self, kind: KeyKind) -> Self {
        self.config.key_kind = kind;
        self
    }

    pub fn value_kind(mut self, kind: ValueKind) -> Self {
        self.config.value_kind = kind;
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.config.dynamic = dynamic;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<TableConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
