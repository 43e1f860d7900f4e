use thiserror::Error;

/// Why a single remote fetch could not produce a value.
///
/// Every kind means "unavailable" to the engine; the distinction only
/// matters for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch repositories: {0}")]
    RepositoriesUnavailable(FetchError),

    #[error("Remote data unavailable: {0}")]
    Unavailable(FetchError),

    #[error("Invalid GitHub login: {0:?}")]
    InvalidLogin(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
