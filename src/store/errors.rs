//! Store error types

use std::io;

use thiserror::Error;

use crate::model::CustomerId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failures. Absence of a record is never a `StoreError`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Checksum or framing failure in the record log
    #[error("data corruption at offset {offset}: {message}")]
    Corruption { offset: u64, message: String },

    /// A customer could not be encoded for storage
    #[error("failed to encode customer {id}: {source}")]
    Encode {
        id: CustomerId,
        #[source]
        source: serde_json::Error,
    },

    /// An earlier append failed and its partial record could not be removed
    #[error("customer log is read-only after a failed write at offset {offset}")]
    WriterFailed { offset: u64 },

    /// Another thread panicked while holding the store lock
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, message: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            message: message.into(),
        }
    }

    /// The on-disk state can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption { .. } | Self::WriterFailed { .. })
    }
}
