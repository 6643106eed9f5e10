//! In-memory customer store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::CustomerStore;
use crate::model::{Customer, CustomerId, CustomerPatch, NewCustomer};

/// Volatile store keyed by customer id. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<CustomerId, Customer>>> {
        self.customers.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<CustomerId, Customer>>> {
        self.customers.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl CustomerStore for MemoryStore {
    fn find_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn insert(&self, new: NewCustomer) -> StoreResult<Customer> {
        let customer = Customer::from_new(CustomerId::generate(), new);
        self.write()?.insert(customer.id, customer.clone());
        debug!(id = %customer.id, "inserted customer");
        Ok(customer)
    }

    fn update_by_id(
        &self,
        id: &CustomerId,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let mut customers = self.write()?;
        let Some(customer) = customers.get_mut(id) else {
            return Ok(None);
        };
        patch.apply_to(customer);
        Ok(Some(customer.clone()))
    }

    fn delete_by_id(&self, id: &CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.write()?.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(name: &str, member_number: i64) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            member_number,
            interests: "chess".to_string(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryStore::new();
        let inserted = store.insert(candidate("Alice", 42)).unwrap();

        let found = store.find_by_id(&inserted.id).unwrap();
        assert_eq!(found, Some(inserted));
    }

    #[test]
    fn test_find_all_tracks_inserts_and_deletes() {
        let store = MemoryStore::new();
        assert!(store.find_all().unwrap().is_empty());

        let a = store.insert(candidate("Alice", 1)).unwrap();
        store.insert(candidate("Bob", 2)).unwrap();
        store.insert(candidate("Carol", 3)).unwrap();
        store.delete_by_id(&a.id).unwrap();

        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_replaces_supplied_fields() {
        let store = MemoryStore::new();
        let inserted = store.insert(candidate("Alice", 42)).unwrap();

        let patch = CustomerPatch {
            name: Some("Alicia".to_string()),
            ..Default::default()
        };
        let updated = store.update_by_id(&inserted.id, patch).unwrap().unwrap();

        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.member_number, 42);
        assert_eq!(store.find_by_id(&inserted.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_unknown_id_does_not_create() {
        let store = MemoryStore::new();
        let patch = CustomerPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };

        let result = store.update_by_id(&CustomerId::generate(), patch).unwrap();
        assert!(result.is_none());
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_twice() {
        let store = MemoryStore::new();
        let inserted = store.insert(candidate("Alice", 42)).unwrap();

        let deleted = store.delete_by_id(&inserted.id).unwrap();
        assert_eq!(deleted, Some(inserted.clone()));
        assert!(store.find_by_id(&inserted.id).unwrap().is_none());
        assert!(store.delete_by_id(&inserted.id).unwrap().is_none());
    }
}
