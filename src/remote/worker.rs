use super::{CustomerApi, CustomerRecord, CustomerUpdate, DeletedCustomer};
use crate::shared::errors::RemoteError;
use crate::shared::ids::CustomerId;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    FetchCustomer(CustomerId),
    UpdateCustomer(CustomerUpdate),
    DeleteCustomer(CustomerId),
    ListCustomers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    CustomerFetched {
        id: CustomerId,
        result: Result<CustomerRecord, RemoteError>,
    },
    CustomerUpdated {
        id: CustomerId,
        result: Result<CustomerRecord, RemoteError>,
    },
    CustomerDeleted {
        id: CustomerId,
        result: Result<DeletedCustomer, RemoteError>,
    },
    CustomersListed(Result<Vec<CustomerRecord>, RemoteError>),
}

pub fn execute_request(api: &dyn CustomerApi, request: RemoteRequest) -> RemoteResponse {
    match request {
        RemoteRequest::FetchCustomer(id) => {
            let result = api.fetch_customer(&id);
            RemoteResponse::CustomerFetched { id, result }
        }
        RemoteRequest::UpdateCustomer(update) => {
            let result = api.update_customer(&update);
            RemoteResponse::CustomerUpdated {
                id: update.id,
                result,
            }
        }
        RemoteRequest::DeleteCustomer(id) => {
            let result = api.delete_customer(&id);
            RemoteResponse::CustomerDeleted { id, result }
        }
        RemoteRequest::ListCustomers => RemoteResponse::CustomersListed(api.list_customers()),
    }
}

/// Fire-and-forget request queue. Requests are single-shot: no retry, no
/// cancellation; responses are collected on the UI thread by polling.
pub trait RemoteDispatch {
    fn dispatch(&mut self, request: RemoteRequest);
    fn poll_responses(&mut self) -> Vec<RemoteResponse>;
}

/// Runs each request immediately on the calling thread and hands the response
/// out on the next poll.
pub struct InlineDispatch<A: CustomerApi> {
    api: A,
    pending: Vec<RemoteResponse>,
}

impl<A: CustomerApi> InlineDispatch<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            pending: Vec::new(),
        }
    }
}

impl<A: CustomerApi> RemoteDispatch for InlineDispatch<A> {
    fn dispatch(&mut self, request: RemoteRequest) {
        let response = execute_request(&self.api, request);
        self.pending.push(response);
    }

    fn poll_responses(&mut self) -> Vec<RemoteResponse> {
        std::mem::take(&mut self.pending)
    }
}

/// Executes requests on a dedicated background thread. The thread is
/// detached: dropping the dispatch closes the request channel and never waits
/// for a call still in flight.
pub struct WorkerDispatch {
    requests: Option<Sender<RemoteRequest>>,
    responses: Receiver<RemoteResponse>,
    stranded: Vec<RemoteResponse>,
}

impl WorkerDispatch {
    pub fn spawn<A>(api: A) -> Result<Self, String>
    where
        A: CustomerApi + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<RemoteRequest>();
        let (response_tx, response_rx) = mpsc::channel();
        thread::Builder::new()
            .name("custdesk-remote".to_string())
            .spawn(move || {
                for request in request_rx {
                    if response_tx.send(execute_request(&api, request)).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| format!("failed to spawn remote worker: {e}"))?;
        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            stranded: Vec::new(),
        })
    }
}

impl RemoteDispatch for WorkerDispatch {
    fn dispatch(&mut self, request: RemoteRequest) {
        let Some(sender) = &self.requests else {
            self.stranded.push(failed_response(request));
            return;
        };
        // A send only fails once the worker has exited.
        if let Err(mpsc::SendError(request)) = sender.send(request) {
            self.requests = None;
            self.stranded.push(failed_response(request));
        }
    }

    fn poll_responses(&mut self) -> Vec<RemoteResponse> {
        let mut responses: Vec<RemoteResponse> = self.responses.try_iter().collect();
        responses.append(&mut self.stranded);
        responses
    }
}

fn failed_response(request: RemoteRequest) -> RemoteResponse {
    let err = RemoteError::WorkerStopped;
    match request {
        RemoteRequest::FetchCustomer(id) => RemoteResponse::CustomerFetched {
            id,
            result: Err(err),
        },
        RemoteRequest::UpdateCustomer(update) => RemoteResponse::CustomerUpdated {
            id: update.id,
            result: Err(err),
        },
        RemoteRequest::DeleteCustomer(id) => RemoteResponse::CustomerDeleted {
            id,
            result: Err(err),
        },
        RemoteRequest::ListCustomers => RemoteResponse::CustomersListed(Err(err)),
    }
}
