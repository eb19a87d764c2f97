use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::routing::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One fully resolved HTTP call. Retries re-send the same value, so every
/// attempt of a logical request is identical.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub json_body: Option<Value>,
    pub timeout: Duration,
    pub route: Route,
}

impl ApiRequest {
    /// A body makes the call a POST, no body makes it a GET.
    pub fn new(
        url: impl Into<String>,
        json_body: Option<Value>,
        timeout: Duration,
        route: Route,
    ) -> Self {
        let method = if json_body.is_some() {
            Method::Post
        } else {
            Method::Get
        };

        Self {
            method,
            url: url.into(),
            json_body,
            timeout,
            route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }
}

/// Sends a single request attempt. Implementations must report connection,
/// DNS, proxy and timeout problems as `NetworkError::TransportFailure` and
/// leave status interpretation to the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse>;
}
