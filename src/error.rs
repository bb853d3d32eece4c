//! Error type shared by every table operation.

use thiserror::Error;

use crate::kind::{KeyKind, ValueKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// The table has no storage (never allocated or already released).
    #[error("invalid argument: {operation} on a released table")]
    InvalidArgument { operation: &'static str },

    #[error(
        "schema mismatch: table is <{expected_key}, {expected_value}>, entry is <{found_key}, {found_value}>"
    )]
    SchemaMismatch {
        expected_key: KeyKind,
        expected_value: ValueKind,
        found_key: KeyKind,
        found_value: ValueKind,
    },

    /// A static table is full.
    #[error("out of capacity: static table holds {capacity} entries")]
    OutOfCapacity { capacity: usize },

    #[error("allocation failed: requested {requested} slots")]
    AllocationFailure { requested: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl TableError {
    pub(crate) fn released(operation: &'static str) -> Self {
        Self::InvalidArgument { operation }
    }

    pub(crate) fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
