//! Proxy routing: decides per request whether traffic goes through the
//! local Tor SOCKS proxy or straight to the target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Top-level label that marks a Tor hidden service.
pub const ONION_TLD: &str = "onion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// Every request goes through the SOCKS proxy.
    Always,
    /// No request goes through the SOCKS proxy.
    Never,
    /// Only `.onion` targets go through the SOCKS proxy.
    #[default]
    Auto,
}

impl FromStr for ProxyMode {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "always" => Ok(ProxyMode::Always),
            "false" | "never" => Ok(ProxyMode::Never),
            "auto" => Ok(ProxyMode::Auto),
            other => Err(NetworkError::InvalidConfiguration(format!(
                "proxy mode must be one of true, false or auto, got {:?}",
                other
            ))),
        }
    }
}

impl From<bool> for ProxyMode {
    fn from(always: bool) -> Self {
        if always {
            ProxyMode::Always
        } else {
            ProxyMode::Never
        }
    }
}

impl fmt::Display for ProxyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProxyMode::Always => "true",
            ProxyMode::Never => "false",
            ProxyMode::Auto => "auto",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Direct,
    Tor,
}

impl ProxyMode {
    pub fn route_for(self, url: &str) -> Route {
        match self {
            ProxyMode::Always => Route::Tor,
            ProxyMode::Never => Route::Direct,
            ProxyMode::Auto if is_onion_url(url) => Route::Tor,
            ProxyMode::Auto => Route::Direct,
        }
    }
}

/// True when `url` has the shape `scheme://host...` and the host's last
/// dot-separated label is `onion`. Anything that does not split that way is
/// treated as a clearnet address.
pub fn is_onion_url(url: &str) -> bool {
    let mut segments = url.split('/');
    let (Some(scheme), Some(""), Some(domain)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    if !scheme.ends_with(':') {
        return false;
    }

    domain.rsplit('.').next() == Some(ONION_TLD)
}
