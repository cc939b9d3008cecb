#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("graphql request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
    #[error("failed to decode graphql response: {0}")]
    Decode(String),
    #[error("graphql returned errors: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("graphql response is missing `{field}`")]
    MissingData { field: String },
    #[error("customer `{id}` does not exist")]
    NotFound { id: String },
    #[error("remote worker is not running")]
    WorkerStopped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("query `{query}` has not been written to the cache")]
    NotPopulated { query: &'static str },
}
