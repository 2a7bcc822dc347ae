use std::time::Duration;

/// Errors raised while talking to the task metadata endpoint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{0}` is not set, are you running this on ECS?")]
    MissingEndpoint(&'static str),
    #[error("invalid metadata endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("failed to request `{path}`: {source}")]
    Request {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} for `{path}`")]
    Status {
        path: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode `{path}`: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot retrieval exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
