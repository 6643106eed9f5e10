//! # File-backed Customer Store
//!
//! Customers live in `<data_dir>/data/customers.dat`, an append-only log of
//! checksummed records. Inserts and updates append the full document, deletes
//! append a tombstone. On open the log is replayed into an in-memory index
//! that serves all reads.
//!
//! Corruption anywhere in the log fails the open; nothing is skipped.

mod checksum;
mod reader;
mod record;
mod writer;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::CustomerStore;
use crate::model::{Customer, CustomerId, CustomerPatch, NewCustomer};

use reader::LogReader;
use record::CustomerRecord;
use writer::LogWriter;

const LOG_FILE_NAME: &str = "customers.dat";

struct FileState {
    writer: LogWriter,
    customers: HashMap<CustomerId, Customer>,
}

/// Durable store over a single record log
pub struct FileStore {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl FileStore {
    /// Open (or create) the store under `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let log_dir = data_dir.join("data");
        fs::create_dir_all(&log_dir).map_err(|e| {
            StoreError::io(
                format!("Failed to create data directory: {}", log_dir.display()),
                e,
            )
        })?;

        let log_path = log_dir.join(LOG_FILE_NAME);
        let customers = if log_path.exists() {
            LogReader::open(&log_path)?.replay()?
        } else {
            HashMap::new()
        };

        let writer = LogWriter::open(&log_path)?;
        debug!(
            path = %log_path.display(),
            bytes = writer.current_offset(),
            customers = customers.len(),
            "replayed customer log"
        );

        Ok(Self {
            path: log_path,
            state: Mutex::new(FileState { writer, customers }),
        })
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live customers
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.customers.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, FileState>> {
        self.state.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn encode(customer: &Customer) -> StoreResult<CustomerRecord> {
        CustomerRecord::live(customer).map_err(|source| StoreError::Encode {
            id: customer.id,
            source,
        })
    }
}

impl CustomerStore for FileStore {
    fn find_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.lock()?.customers.get(id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.lock()?.customers.values().cloned().collect())
    }

    fn insert(&self, new: NewCustomer) -> StoreResult<Customer> {
        let customer = Customer::from_new(CustomerId::generate(), new);
        let record = Self::encode(&customer)?;

        let mut state = self.lock()?;
        let offset = state.writer.append(&record)?;
        state.customers.insert(customer.id, customer.clone());
        debug!(id = %customer.id, offset, "appended customer");

        Ok(customer)
    }

    fn update_by_id(
        &self,
        id: &CustomerId,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let mut state = self.lock()?;
        let Some(mut updated) = state.customers.get(id).cloned() else {
            return Ok(None);
        };
        patch.apply_to(&mut updated);

        let record = Self::encode(&updated)?;
        let offset = state.writer.append(&record)?;
        state.customers.insert(updated.id, updated.clone());
        debug!(id = %updated.id, offset, "appended customer update");

        Ok(Some(updated))
    }

    fn delete_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>> {
        let mut state = self.lock()?;
        if !state.customers.contains_key(id) {
            return Ok(None);
        }

        let offset = state.writer.append(&CustomerRecord::tombstone(*id))?;
        debug!(id = %id, offset, "appended tombstone");
        Ok(state.customers.remove(id))
    }
}
