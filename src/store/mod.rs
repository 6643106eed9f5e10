//! # Customer Store
//!
//! The data access layer. Every backend implements [`CustomerStore`]; the
//! HTTP layer only ever sees the trait object.
//!
//! Absence is not an error: lookups, updates and deletes on an unknown id
//! return `Ok(None)`. `Err` is reserved for backend failures.

mod errors;
mod file;
mod memory;

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::model::{Customer, CustomerId, CustomerPatch, NewCustomer};

pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Id-keyed CRUD over the customer collection.
///
/// Each call is atomic with respect to every other call on the same store.
/// There are no multi-call transactions.
pub trait CustomerStore: Send + Sync {
    /// Point lookup by id
    fn find_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>>;

    /// Full scan, in no particular order
    fn find_all(&self) -> StoreResult<Vec<Customer>>;

    /// Assign a fresh id, persist, and return the stored record
    fn insert(&self, new: NewCustomer) -> StoreResult<Customer>;

    /// Replace the supplied fields. Never creates a record.
    fn update_by_id(&self, id: &CustomerId, patch: CustomerPatch)
        -> StoreResult<Option<Customer>>;

    /// Remove the record and hand it back
    fn delete_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>>;
}

/// Shared store handle injected into request handlers
pub type SharedStore = Arc<dyn CustomerStore>;

/// Open the backend described by `config`
pub fn open(config: &StorageConfig) -> StoreResult<SharedStore> {
    match config {
        StorageConfig::Memory => {
            info!("using in-memory customer store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageConfig::File { data_dir } => {
            let store = FileStore::open(data_dir)?;
            info!(
                path = %store.path().display(),
                customers = store.len()?,
                "opened file customer store"
            );
            Ok(Arc::new(store))
        }
    }
}
