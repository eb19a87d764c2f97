use bitmix_network::Config as NetworkConfig;
use rand::Rng;

pub const DEFAULT_ENDPOINT: &str = "https://bitmix.biz";
pub const DEFAULT_ONION_ENDPOINT: &str = "http://bitmixbizymuphkc.onion";
pub const DEFAULT_AFFILIATE: &str = "1555109354-3YjJ-MfCa-aLkH";

/// Random fee between 2.1 and 2.9 percent, in tenths.
pub fn random_fee() -> f64 {
    let tenths: u32 = rand::thread_rng().gen_range(1..=9);
    f64::from(20 + tenths) / 10.0
}

/// Random mixing delay between 10 and 70 minutes.
pub fn random_delay() -> u32 {
    rand::thread_rng().gen_range(10..=70)
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, clearnet or onion
    pub endpoint: String,
    /// Service fee in percent, sent as `tax`
    pub fee: f64,
    /// Minutes the service waits before forwarding mixed coins
    pub delay_minutes: u32,
    pub affiliate: Option<String>,
    pub retry: bool,
    pub network: NetworkConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fee: random_fee(),
            delay_minutes: random_delay(),
            affiliate: Some(DEFAULT_AFFILIATE.to_string()),
            retry: false,
            network: NetworkConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_delay(mut self, minutes: u32) -> Self {
        self.delay_minutes = minutes;
        self
    }

    pub fn with_affiliate(mut self, affiliate: Option<String>) -> Self {
        self.affiliate = affiliate;
        self
    }

    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }
}
