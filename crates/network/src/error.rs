use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Client error ({status}): {}", String::from_utf8_lossy(.body))]
    ClientError { status: u16, body: Vec<u8> },

    #[error("Server error ({status}): {}", String::from_utf8_lossy(.body))]
    ServerError { status: u16, body: Vec<u8> },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Unexpected HTTP status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: u16, body: Vec<u8> },
}

impl NetworkError {
    /// Raw response body carried by status-class errors.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            NetworkError::ClientError { body, .. }
            | NetworkError::ServerError { body, .. }
            | NetworkError::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::ClientError { status, .. }
            | NetworkError::ServerError { status, .. }
            | NetworkError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
