use super::{CustomerApi, CustomerRecord, CustomerUpdate, DeletedCustomer};
use crate::shared::errors::RemoteError;
use crate::shared::ids::CustomerId;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Fetch(CustomerId),
    Update(CustomerUpdate),
    Delete(CustomerId),
    List,
}

#[derive(Debug, Default)]
struct MemoryState {
    customers: Vec<CustomerRecord>,
    calls: Vec<ApiCall>,
    failures: Vec<(&'static str, RemoteError)>,
}

/// Customer store kept in process memory. Clones share state, so a test can
/// keep a handle while the application owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerApi {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryCustomerApi {
    pub fn new(customers: Vec<CustomerRecord>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                customers,
                ..MemoryState::default()
            })),
        }
    }

    /// Demo data used by `--demo`.
    pub fn seeded() -> Self {
        let seed = [
            ("1", "Ada Lovelace", "ada@example.com"),
            ("2", "Grace Hopper", "grace@example.com"),
            ("3", "Alan Turing", "alan@example.com"),
            ("42", "Ann", "a@x.com"),
        ];
        Self::new(
            seed.iter()
                .filter_map(|(id, name, email)| {
                    Some(CustomerRecord {
                        id: CustomerId::parse(id).ok()?,
                        name: (*name).to_string(),
                        email: (*email).to_string(),
                    })
                })
                .collect(),
        )
    }

    /// Makes the next call of `operation` (`fetch`, `update`, `delete`,
    /// `list`) fail with `error`.
    pub fn fail_next(&self, operation: &'static str, error: RemoteError) {
        self.lock().failures.push((operation, error));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn customers(&self) -> Vec<CustomerRecord> {
        self.lock().customers.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl MemoryState {
    fn take_failure(&mut self, operation: &str) -> Option<RemoteError> {
        let index = self
            .failures
            .iter()
            .position(|(name, _)| *name == operation)?;
        Some(self.failures.remove(index).1)
    }
}

impl CustomerApi for InMemoryCustomerApi {
    fn fetch_customer(&self, id: &CustomerId) -> Result<CustomerRecord, RemoteError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Fetch(id.clone()));
        if let Some(err) = state.take_failure("fetch") {
            return Err(err);
        }
        state
            .customers
            .iter()
            .find(|customer| &customer.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })
    }

    fn update_customer(&self, update: &CustomerUpdate) -> Result<CustomerRecord, RemoteError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Update(update.clone()));
        if let Some(err) = state.take_failure("update") {
            return Err(err);
        }
        let customer = state
            .customers
            .iter_mut()
            .find(|customer| customer.id == update.id)
            .ok_or_else(|| RemoteError::NotFound {
                id: update.id.to_string(),
            })?;
        customer.name = update.name.clone();
        customer.email = update.email.clone();
        Ok(customer.clone())
    }

    fn delete_customer(&self, id: &CustomerId) -> Result<DeletedCustomer, RemoteError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Delete(id.clone()));
        if let Some(err) = state.take_failure("delete") {
            return Err(err);
        }
        let before = state.customers.len();
        state.customers.retain(|customer| &customer.id != id);
        if state.customers.len() == before {
            return Err(RemoteError::NotFound { id: id.to_string() });
        }
        Ok(DeletedCustomer { id: id.clone() })
    }

    fn list_customers(&self) -> Result<Vec<CustomerRecord>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::List);
        if let Some(err) = state.take_failure("list") {
            return Err(err);
        }
        Ok(state.customers.clone())
    }
}
