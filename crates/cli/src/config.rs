use anyhow::{anyhow, Result};
use bitmix_network::{Config as NetworkConfig, ProxyMode};
use bitmix_sdk::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_ONION_ENDPOINT};

use crate::cli::{ConnectionArgs, MixArgs};

/// Settings read from the environment (and `.env`). Flags take precedence.
#[derive(Debug, Default, Clone)]
pub struct EnvSettings {
    pub endpoint: Option<String>,
    pub socks_addr: Option<String>,
    pub proxy_mode: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl EnvSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = lookup("BITMIX_TIMEOUT_SECS")
            .map(|s| {
                s.parse()
                    .map_err(|e| anyhow!("Invalid BITMIX_TIMEOUT_SECS {:?}: {}", s, e))
            })
            .transpose()?;

        Ok(Self {
            endpoint: lookup("BITMIX_ENDPOINT"),
            socks_addr: lookup("TOR_SOCKS_ADDR"),
            proxy_mode: lookup("BITMIX_PROXY_MODE"),
            timeout_secs,
        })
    }
}

pub fn client_config(env: &EnvSettings, args: &ConnectionArgs) -> Result<ClientConfig> {
    let endpoint = if args.onion {
        DEFAULT_ONION_ENDPOINT.to_string()
    } else {
        args.endpoint
            .clone()
            .or_else(|| env.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    };

    let proxy_mode = match args.proxy.as_ref().or(env.proxy_mode.as_ref()) {
        Some(mode) => mode.parse::<ProxyMode>()?,
        None => ProxyMode::Auto,
    };

    let mut network = NetworkConfig::default().with_proxy_mode(proxy_mode);
    if let Some(addr) = args.socks_addr.as_ref().or(env.socks_addr.as_ref()) {
        network = network.with_socks_addr(addr.as_str());
    }
    if let Some(secs) = args.timeout.or(env.timeout_secs) {
        network = network.with_timeout(secs);
    }

    Ok(ClientConfig::default()
        .with_endpoint(endpoint)
        .with_retry(args.retry)
        .with_network(network))
}

pub fn apply_mix_args(mut config: ClientConfig, args: &MixArgs) -> ClientConfig {
    if let Some(fee) = args.fee {
        config = config.with_fee(fee);
    }
    if let Some(delay) = args.delay {
        config = config.with_delay(delay);
    }
    if args.no_affiliate {
        config = config.with_affiliate(None);
    } else if let Some(affiliate) = &args.affiliate {
        config = config.with_affiliate(Some(affiliate.clone()));
    }
    config
}
