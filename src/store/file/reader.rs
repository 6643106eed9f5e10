//! Sequential log reader
//!
//! Every record is checksum-verified as it is read. Any framing or checksum
//! failure is reported as corruption at the offending offset.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::record::{CustomerRecord, MIN_RECORD_SIZE};
use crate::model::{Customer, CustomerId};
use crate::store::errors::{StoreError, StoreResult};

pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io(format!("Failed to open customer log: {}", path.display()), e)
        })?;
        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read customer log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Next record, or `None` at end of log
    pub fn read_next(&mut self) -> StoreResult<Option<CustomerRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Invalid record length {} ({} bytes remaining)",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = CustomerRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption(self.current_offset, e.to_string()))?;
        self.current_offset += consumed as u64;

        Ok(Some(record))
    }

    /// Replay the whole log into the current set of live customers.
    ///
    /// Later records for an id replace earlier ones; a tombstone removes it.
    pub fn replay(mut self) -> StoreResult<HashMap<CustomerId, Customer>> {
        let mut customers = HashMap::new();
        loop {
            let offset = self.current_offset;
            let Some(record) = self.read_next()? else {
                break;
            };

            if record.is_tombstone {
                customers.remove(&record.id);
                continue;
            }

            let customer = record.decode_customer().map_err(|e| {
                StoreError::corruption(offset, format!("Undecodable customer body: {}", e))
            })?;
            if customer.id != record.id {
                return Err(StoreError::corruption(
                    offset,
                    format!("Record id {} does not match body id {}", record.id, customer.id),
                ));
            }
            customers.insert(record.id, customer);
        }
        Ok(customers)
    }
}
