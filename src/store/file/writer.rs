//! Append-only log writer
//!
//! Records are never rewritten in place. Each append is fsynced before it is
//! acknowledged.
//!
//! A failed append truncates the file back to the last acknowledged record
//! so later appends never land behind torn bytes. If that truncation also
//! fails the writer refuses every further append.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{error, warn};

use super::record::CustomerRecord;
use crate::store::errors::{StoreError, StoreResult};

pub struct LogWriter {
    file: File,
    current_offset: u64,
    failed: bool,
}

impl LogWriter {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open customer log: {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read customer log metadata", e))?
            .len();

        Ok(Self::from_file(file, current_offset))
    }

    fn from_file(file: File, current_offset: u64) -> Self {
        Self {
            file,
            current_offset,
            failed: false,
        }
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Append one record and fsync. Returns the offset it was written at.
    pub fn append(&mut self, record: &CustomerRecord) -> StoreResult<u64> {
        if self.failed {
            return Err(StoreError::WriterFailed {
                offset: self.current_offset,
            });
        }

        let serialized = record.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.write_synced(&serialized) {
            self.discard_partial();
            return Err(StoreError::io(
                format!("Failed to write customer {}", record.id),
                e,
            ));
        }

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }

    fn write_synced(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        self.file.sync_all()
    }

    /// Cut the file back to the last acknowledged record
    fn discard_partial(&mut self) {
        let truncated = self
            .file
            .set_len(self.current_offset)
            .and_then(|()| self.file.sync_all());

        match truncated {
            Ok(()) => warn!(
                offset = self.current_offset,
                "discarded partial customer record"
            ),
            Err(e) => {
                error!(
                    offset = self.current_offset,
                    error = %e,
                    "could not discard partial customer record; log is now read-only"
                );
                self.failed = true;
            }
        }
    }
}
