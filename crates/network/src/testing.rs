//! In-memory transport for tests: replays a scripted list of results and
//! records every request it receives. An exhausted script answers with
//! `InvalidConfiguration`, which the dispatcher never retries.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{NetworkError, Result};
use crate::transport::{ApiRequest, RawResponse, Transport};

#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Ok(RawResponse::new(status, body)))
    }

    pub fn fail(self, cause: impl Into<String>) -> Self {
        self.push(Err(NetworkError::TransportFailure(cause.into())))
    }

    fn push(self, result: Result<RawResponse>) -> Self {
        lock(&self.script).push_back(result);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        lock(&self.requests).push(request.clone());
        lock(&self.script).pop_front().unwrap_or_else(|| {
            Err(NetworkError::InvalidConfiguration(
                "scripted transport has no more responses".into(),
            ))
        })
    }
}
