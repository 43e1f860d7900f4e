use contribhub_core::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::ApiError { status, body } => FetchError::Status { status, body },
            Error::Json(e) => FetchError::Decode(e.to_string()),
            Error::Request(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_status() {
        let err = Error::ApiError {
            status: 403,
            body: "rate limited".to_string(),
        };

        assert_eq!(
            FetchError::from(err),
            FetchError::Status {
                status: 403,
                body: "rate limited".to_string()
            }
        );
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();

        assert!(matches!(FetchError::from(Error::Json(json_err)), FetchError::Decode(_)));
        assert!(matches!(
            FetchError::from(Error::ConfigError("bad".to_string())),
            FetchError::Transport(_)
        ));
    }
}
