use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Errors raised while talking to the Roundtable API.
///
/// Every resource call fails with exactly one of these two kinds:
/// [`ClientError::Transport`] when the request never produced a parseable
/// envelope, [`ClientError::Api`] when the server reported failure either
/// through the HTTP status or through the envelope's `success` flag.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: {message}")]
    Api { message: String },
}

/// Transport layer errors (network failure, malformed response body)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {message}")]
    InvalidJson { message: String },
}

impl ClientError {
    /// Server-reported message for API errors, `None` for transport errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message } => Some(message),
            ClientError::Transport(_) => None,
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for API client operations
pub type ClientResult<T> = Result<T, ClientError>;
