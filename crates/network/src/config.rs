use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routing::ProxyMode;

pub const DEFAULT_TOR_SOCKS_ADDR: &str = "127.0.0.1:9050";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Process-wide dispatcher settings. Built once at startup and never
/// mutated after the dispatcher takes ownership of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub socks_addr: String,
    pub timeout_secs: u64,
    pub retry_delay: Duration,
    pub proxy_mode: ProxyMode,
    pub verify_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socks_addr: DEFAULT_TOR_SOCKS_ADDR.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_delay: DEFAULT_RETRY_DELAY,
            proxy_mode: ProxyMode::Auto,
            verify_tls: true,
        }
    }
}

impl Config {
    pub fn with_socks_addr(mut self, addr: impl Into<String>) -> Self {
        self.socks_addr = addr.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_proxy_mode(mut self, mode: ProxyMode) -> Self {
        self.proxy_mode = mode;
        self
    }

    pub fn without_tls_verify(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn proxy_url(&self) -> String {
        format!("socks5h://{}", self.socks_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.socks_addr, "127.0.0.1:9050");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.retry_delay, Duration::from_secs(5));
        assert_eq!(config.proxy_mode, ProxyMode::Auto);
        assert!(config.verify_tls);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_socks_addr("10.0.0.2:9150")
            .with_timeout(5)
            .with_retry_delay(Duration::ZERO)
            .with_proxy_mode(ProxyMode::Never)
            .without_tls_verify();

        assert_eq!(config.proxy_url(), "socks5h://10.0.0.2:9150");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.proxy_mode, ProxyMode::Never);
        assert!(!config.verify_tls);
    }
}
