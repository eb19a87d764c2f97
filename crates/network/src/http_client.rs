use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, Proxy};

use crate::config::Config;
use crate::error::{NetworkError, Result};
use crate::routing::Route;
use crate::transport::{ApiRequest, Method, RawResponse, Transport};

/// reqwest-backed transport holding one client per route. The Tor client
/// resolves hostnames through the proxy (`socks5h`) so `.onion` names never
/// hit the local resolver.
pub struct HttpClient {
    direct: Client,
    tor: Client,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let proxy = Proxy::all(config.proxy_url())
            .map_err(|e| NetworkError::InvalidConfiguration(format!("Invalid proxy URL: {}", e)))?;

        let tor = Self::builder(config)
            .proxy(proxy)
            .build()
            .map_err(|e| {
                NetworkError::InvalidConfiguration(format!("Failed to build Tor client: {}", e))
            })?;

        let direct = Self::builder(config)
            .no_proxy()
            .build()
            .map_err(|e| {
                NetworkError::InvalidConfiguration(format!("Failed to build client: {}", e))
            })?;

        Ok(Self { direct, tor })
    }

    fn builder(config: &Config) -> ClientBuilder {
        let mut builder = Client::builder().timeout(config.timeout());

        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
    }

    fn client_for(&self, route: Route) -> &Client {
        match route {
            Route::Direct => &self.direct,
            Route::Tor => &self.tor,
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let client = self.client_for(request.route);

        let builder = match (request.method, &request.json_body) {
            (Method::Post, Some(body)) => client.post(&request.url).json(body),
            (Method::Post, None) => client.post(&request.url),
            (Method::Get, _) => client.get(&request.url),
        };

        let response = builder
            .header(ACCEPT, "application/json")
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                NetworkError::TransportFailure(format!("{} request failed: {}", request.method, e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::TransportFailure(format!("Failed to read body: {}", e)))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
