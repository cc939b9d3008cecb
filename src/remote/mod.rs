pub mod graphql;
pub mod memory;
pub mod worker;

use crate::shared::errors::RemoteError;
use crate::shared::ids::CustomerId;
use serde::{Deserialize, Deserializer, Serialize};

pub use graphql::GraphqlClient;
pub use memory::{ApiCall, InMemoryCustomerApi};
pub use worker::{
    execute_request, InlineDispatch, RemoteDispatch, RemoteRequest, RemoteResponse, WorkerDispatch,
};

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

/// Full replacement values for a customer; never a partial diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerUpdate {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeletedCustomer {
    pub id: CustomerId,
}

/// Remote operations the customer screens depend on.
pub trait CustomerApi {
    fn fetch_customer(&self, id: &CustomerId) -> Result<CustomerRecord, RemoteError>;
    fn update_customer(&self, update: &CustomerUpdate) -> Result<CustomerRecord, RemoteError>;
    fn delete_customer(&self, id: &CustomerId) -> Result<DeletedCustomer, RemoteError>;
    fn list_customers(&self) -> Result<Vec<CustomerRecord>, RemoteError>;
}
