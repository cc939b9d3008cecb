use super::{CustomerApi, CustomerRecord, CustomerUpdate, DeletedCustomer};
use crate::shared::errors::RemoteError;
use crate::shared::ids::CustomerId;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const GET_CUSTOMER: &str =
    "query GetCustomer($id: ID!) { customer(id: $id) { id name email } }";
pub const GET_CUSTOMERS: &str = "query GetCustomers { customers { id name email } }";
pub const UPDATE_CUSTOMER: &str = "mutation UpdateCustomer($id: ID!, $name: String, $email: String) { updateCustomer(id: $id, name: $name, email: $email) { id name email } }";
pub const DELETE_CUSTOMER: &str =
    "mutation DeleteCustomer($id: ID!) { deleteCustomer(id: $id) { id } }";

#[derive(Debug, Clone, Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CustomerData {
    customer: Option<CustomerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct CustomersData {
    #[serde(default)]
    customers: Option<Vec<CustomerRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCustomerData {
    update_customer: Option<CustomerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCustomerData {
    delete_customer: Option<DeletedCustomer>,
}

pub(crate) fn parse_graphql_response<T: DeserializeOwned>(raw: &str) -> Result<T, RemoteError> {
    let envelope: GraphqlEnvelope<T> =
        serde_json::from_str(raw).map_err(|e| RemoteError::Decode(e.to_string()))?;
    if !envelope.errors.is_empty() {
        return Err(RemoteError::Graphql(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    envelope.data.ok_or_else(|| RemoteError::MissingData {
        field: "data".to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl GraphqlClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.trim().to_string(),
            agent,
        }
    }

    fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, RemoteError> {
        let body = json!({
            "query": query,
            "variables": variables,
        });
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(|e| RemoteError::Request {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        let raw = response
            .into_string()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        parse_graphql_response(&raw)
    }
}

impl CustomerApi for GraphqlClient {
    fn fetch_customer(&self, id: &CustomerId) -> Result<CustomerRecord, RemoteError> {
        let data: CustomerData = self.execute(GET_CUSTOMER, json!({ "id": id }))?;
        data.customer.ok_or_else(|| RemoteError::NotFound {
            id: id.to_string(),
        })
    }

    fn update_customer(&self, update: &CustomerUpdate) -> Result<CustomerRecord, RemoteError> {
        let variables =
            serde_json::to_value(update).map_err(|e| RemoteError::Decode(e.to_string()))?;
        let data: UpdateCustomerData = self.execute(UPDATE_CUSTOMER, variables)?;
        data.update_customer.ok_or_else(|| RemoteError::MissingData {
            field: "updateCustomer".to_string(),
        })
    }

    fn delete_customer(&self, id: &CustomerId) -> Result<DeletedCustomer, RemoteError> {
        let data: DeleteCustomerData = self.execute(DELETE_CUSTOMER, json!({ "id": id }))?;
        data.delete_customer.ok_or_else(|| RemoteError::MissingData {
            field: "deleteCustomer".to_string(),
        })
    }

    fn list_customers(&self) -> Result<Vec<CustomerRecord>, RemoteError> {
        let data: CustomersData = self.execute(GET_CUSTOMERS, json!({}))?;
        data.customers.ok_or_else(|| RemoteError::MissingData {
            field: "customers".to_string(),
        })
    }
}
