use serde_json::Value;

use crate::error::{NetworkError, Result};
use crate::transport::RawResponse;

/// Body of a 2xx response: decoded JSON when it parses, raw bytes otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Raw(Vec<u8>),
}

impl Payload {
    pub fn from_body(body: Vec<u8>) -> Self {
        match serde_json::from_slice(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Raw(body),
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Payload::Json(Value::Object(_)))
    }
}

/// Status class of a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Payload),
    ClientError { status: u16, body: Vec<u8> },
    ServerError { status: u16, body: Vec<u8> },
    UnexpectedStatus { status: u16, body: Vec<u8> },
}

impl Outcome {
    pub fn classify(response: RawResponse) -> Self {
        let RawResponse { status, body } = response;
        match status / 100 {
            2 => Outcome::Success(Payload::from_body(body)),
            4 => Outcome::ClientError { status, body },
            5 => Outcome::ServerError { status, body },
            _ => Outcome::UnexpectedStatus { status, body },
        }
    }

    pub fn into_result(self) -> Result<Payload> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::ClientError { status, body } => {
                Err(NetworkError::ClientError { status, body })
            }
            Outcome::ServerError { status, body } => {
                Err(NetworkError::ServerError { status, body })
            }
            Outcome::UnexpectedStatus { status, body } => {
                Err(NetworkError::UnexpectedStatus { status, body })
            }
        }
    }
}
