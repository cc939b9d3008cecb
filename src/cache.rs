use crate::remote::CustomerRecord;
use crate::routing::{Router, DEFAULT_ROUTE};
use crate::shared::errors::CacheError;
use crate::shared::ids::CustomerId;
use std::collections::BTreeMap;

pub const CUSTOMERS_QUERY: &str = "customers";

/// Client-side copy of query results: the customer list plus the records
/// answered by the single-customer query or returned by a mutation. List
/// rows do not seed the per-id entries.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    customers: Option<Vec<CustomerRecord>>,
    entities: BTreeMap<CustomerId, CustomerRecord>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_customers(&self) -> Result<&[CustomerRecord], CacheError> {
        self.customers
            .as_deref()
            .ok_or(CacheError::NotPopulated {
                query: CUSTOMERS_QUERY,
            })
    }

    pub fn write_customers(&mut self, customers: Vec<CustomerRecord>) {
        self.customers = Some(customers);
    }

    pub fn read_customer(&self, id: &CustomerId) -> Option<&CustomerRecord> {
        self.entities.get(id)
    }

    /// Stores a fetched or updated record and refreshes the matching list
    /// entry, if the list is cached.
    pub fn write_customer(&mut self, record: CustomerRecord) {
        if let Some(customers) = self.customers.as_mut() {
            if let Some(entry) = customers.iter_mut().find(|entry| entry.id == record.id) {
                *entry = record.clone();
            }
        }
        self.entities.insert(record.id.clone(), record);
    }

    pub fn evict_customer(&mut self, id: &CustomerId) {
        self.entities.remove(id);
    }
}

/// Post-delete reconciliation: drop the deleted customer from the cached list
/// and return to the default route. Nothing is touched when the list is not
/// cached.
pub fn remove_deleted_customer(
    cache: &mut QueryCache,
    router: &mut Router,
    deleted: &CustomerId,
) -> Result<(), CacheError> {
    let remaining: Vec<CustomerRecord> = cache
        .read_customers()?
        .iter()
        .filter(|customer| &customer.id != deleted)
        .cloned()
        .collect();
    cache.write_customers(remaining);
    cache.evict_customer(deleted);
    router.push(DEFAULT_ROUTE);
    Ok(())
}
