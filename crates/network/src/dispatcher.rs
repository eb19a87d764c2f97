use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{NetworkError, Result};
use crate::http_client::HttpClient;
use crate::response::{Outcome, Payload};
use crate::routing::ProxyMode;
use crate::transport::{ApiRequest, Transport};

/// Per-call knobs. Unset fields fall back to the dispatcher's `Config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    pub retry: bool,
    pub timeout: Option<Duration>,
    pub proxy_mode: Option<ProxyMode>,
}

impl DispatchOptions {
    pub fn retrying(retry: bool) -> Self {
        Self {
            retry,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_proxy_mode(mut self, mode: ProxyMode) -> Self {
        self.proxy_mode = Some(mode);
        self
    }
}

/// Single chokepoint for every API call: picks the route, sends the request,
/// classifies the status and applies the retry policy.
///
/// With `retry` set, transport failures and 5xx responses are retried after
/// `Config::retry_delay` with no attempt limit; 4xx responses are never
/// retried.
pub struct Dispatcher<T = HttpClient> {
    transport: T,
    config: Config,
}

impl Dispatcher<HttpClient> {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpClient::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_request(
        &self,
        url: &str,
        json_body: Option<&Value>,
        options: &DispatchOptions,
    ) -> ApiRequest {
        let mode = options.proxy_mode.unwrap_or(self.config.proxy_mode);
        let route = mode.route_for(url);
        debug!(url, ?mode, ?route, "selected route");

        ApiRequest::new(
            url,
            json_body.cloned(),
            options.timeout.unwrap_or_else(|| self.config.timeout()),
            route,
        )
    }

    pub async fn dispatch(
        &self,
        url: &str,
        json_body: Option<&Value>,
        options: &DispatchOptions,
    ) -> Result<Payload> {
        let request = self.build_request(url, json_body, options);
        let delay = self.config.retry_delay;
        let mut attempt: u64 = 1;

        loop {
            debug!(method = %request.method, url = %request.url, attempt, "dispatching");

            match self.transport.send(&request).await {
                Ok(response) => match Outcome::classify(response) {
                    Outcome::ServerError { status, body } if options.retry => {
                        warn!(
                            status,
                            body = %String::from_utf8_lossy(&body),
                            attempt,
                            "Got a server error, retrying in {:?}",
                            delay
                        );
                    }
                    outcome => return outcome.into_result(),
                },
                Err(NetworkError::TransportFailure(cause)) if options.retry => {
                    warn!(attempt, "Got an error, but retrying in {:?}: {}", delay, cause);
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    pub async fn get(&self, url: &str, retry: bool) -> Result<Payload> {
        self.dispatch(url, None, &DispatchOptions::retrying(retry)).await
    }

    pub async fn post(&self, url: &str, body: &Value, retry: bool) -> Result<Payload> {
        self.dispatch(url, Some(body), &DispatchOptions::retrying(retry))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Route;
    use crate::testing::ScriptedTransport;
    use crate::transport::Method;
    use serde_json::json;

    fn dispatcher(transport: ScriptedTransport) -> Dispatcher<ScriptedTransport> {
        Dispatcher::with_transport(transport, Config::default().with_retry_delay(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_success_returns_decoded_json() {
        let transport = ScriptedTransport::new().respond(200, r#"{"status": 3}"#);
        let d = dispatcher(transport);

        let payload = d.get("https://bitmix.biz/api/order/view/1", false).await.unwrap();
        assert_eq!(payload, Payload::Json(json!({"status": 3})));
        assert_eq!(d.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_success_passes_raw_body_through() {
        let transport = ScriptedTransport::new().respond(202, "plain text");
        let d = dispatcher(transport);

        let payload = d.get("https://bitmix.biz/x", false).await.unwrap();
        assert_eq!(payload, Payload::Raw(b"plain text".to_vec()));
    }

    #[tokio::test]
    async fn test_client_error_is_never_retried() {
        for retry in [false, true] {
            let transport = ScriptedTransport::new()
                .respond(404, "not found")
                .respond(200, "{}");
            let d = dispatcher(transport);

            let err = d.get("https://bitmix.biz/x", retry).await.unwrap_err();
            assert!(matches!(err, NetworkError::ClientError { status: 404, .. }));
            assert_eq!(d.transport().request_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_server_error_without_retry_fails_after_one_attempt() {
        let transport = ScriptedTransport::new()
            .respond(502, "bad gateway")
            .respond(200, "{}");
        let d = dispatcher(transport);

        let err = d.get("https://bitmix.biz/x", false).await.unwrap_err();
        match err {
            NetworkError::ServerError { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, b"bad gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(d.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_server_error_with_retry_resends_identical_request() {
        let body = json!({"address": ["1abc"], "delay": 10});
        let transport = ScriptedTransport::new()
            .respond(500, "oops")
            .respond(503, "busy")
            .respond(500, "oops")
            .respond(200, r#"{"id": "abc123"}"#);
        let d = dispatcher(transport);

        let payload = d
            .post("https://bitmix.biz/api/order/create", &body, true)
            .await
            .unwrap();
        assert_eq!(payload, Payload::Json(json!({"id": "abc123"})));

        let requests = d.transport().requests();
        assert_eq!(requests.len(), 4);
        assert!(requests.iter().all(|r| r == &requests[0]));
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].json_body, Some(body));
    }

    #[tokio::test]
    async fn test_transport_failure_without_retry_propagates() {
        let transport = ScriptedTransport::new()
            .fail("connection refused")
            .respond(200, "{}");
        let d = dispatcher(transport);

        let err = d.get("https://bitmix.biz/x", false).await.unwrap_err();
        assert!(matches!(
            err,
            NetworkError::TransportFailure(ref cause) if cause == "connection refused"
        ));
        assert_eq!(d.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_with_retry_keeps_going() {
        let transport = ScriptedTransport::new()
            .fail("timed out")
            .fail("connection reset")
            .respond(500, "")
            .respond(200, "[1, 2]");
        let d = dispatcher(transport);

        let payload = d.get("https://bitmix.biz/x", true).await.unwrap();
        assert_eq!(payload, Payload::Json(json!([1, 2])));
        assert_eq!(d.transport().request_count(), 4);
    }

    #[tokio::test]
    async fn test_retry_stops_on_client_error() {
        let transport = ScriptedTransport::new()
            .respond(500, "")
            .respond(400, "bad request")
            .respond(200, "{}");
        let d = dispatcher(transport);

        let err = d.get("https://bitmix.biz/x", true).await.unwrap_err();
        assert!(matches!(err, NetworkError::ClientError { status: 400, .. }));
        assert_eq!(d.transport().request_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_script_stops_retrying() {
        let transport = ScriptedTransport::new().respond(500, "");
        let d = dispatcher(transport);

        let err = d.get("https://bitmix.biz/x", true).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfiguration(_)));
        assert_eq!(d.transport().request_count(), 2);
    }

    #[test]
    fn test_unexpected_status() {
        let transport = ScriptedTransport::new().respond(302, "");
        let d = dispatcher(transport);

        let err = tokio_test::block_on(d.get("https://bitmix.biz/x", true)).unwrap_err();
        assert!(matches!(err, NetworkError::UnexpectedStatus { status: 302, .. }));
        assert_eq!(d.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_waits_between_attempts() {
        let delay = Duration::from_millis(20);
        let transport = ScriptedTransport::new()
            .respond(500, "")
            .respond(500, "")
            .respond(200, "{}");
        let d = Dispatcher::with_transport(transport, Config::default().with_retry_delay(delay));

        let started = std::time::Instant::now();
        d.get("https://bitmix.biz/x", true).await.unwrap();
        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_route_and_timeout_selection() {
        let transport = ScriptedTransport::new()
            .respond(200, "{}")
            .respond(200, "{}")
            .respond(200, "{}")
            .respond(200, "{}");
        let d = dispatcher(transport);

        d.get("http://bitmixbizymuphkc.onion/api/order/view/1", false)
            .await
            .unwrap();
        d.get("https://bitmix.biz/api/order/view/1", false).await.unwrap();
        let always = DispatchOptions::default()
            .with_proxy_mode(ProxyMode::Always)
            .with_timeout(Duration::from_secs(7));
        d.dispatch("https://bitmix.biz/x", None, &always).await.unwrap();
        let never = DispatchOptions::default().with_proxy_mode(ProxyMode::Never);
        d.dispatch("http://foo.onion/x", None, &never).await.unwrap();

        let requests = d.transport().requests();
        assert_eq!(requests[0].route, Route::Tor);
        assert_eq!(requests[1].route, Route::Direct);
        assert_eq!(requests[1].timeout, Duration::from_secs(60));
        assert_eq!(requests[2].route, Route::Tor);
        assert_eq!(requests[2].timeout, Duration::from_secs(7));
        assert_eq!(requests[3].route, Route::Direct);
    }

    #[tokio::test]
    async fn test_config_proxy_mode_is_default() {
        let transport = ScriptedTransport::new().respond(200, "{}");
        let config = Config::default()
            .with_retry_delay(Duration::ZERO)
            .with_proxy_mode(ProxyMode::Always);
        let d = Dispatcher::with_transport(transport, config);

        d.get("https://bitmix.biz/x", false).await.unwrap();
        assert_eq!(d.transport().requests()[0].route, Route::Tor);
    }

    #[test]
    fn test_get_builds_get_request() {
        let d = dispatcher(ScriptedTransport::new());
        let request = d.build_request("https://bitmix.biz/x", None, &DispatchOptions::default());
        assert_eq!(request.method, Method::Get);
        assert!(request.json_body.is_none());
    }
}
