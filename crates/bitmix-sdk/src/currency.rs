use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Coins the service will mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Bitcoin,
}

pub const SUPPORTED_CURRENCIES: [Currency; 1] = [Currency::Bitcoin];

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Bitcoin => "bitcoin",
        }
    }

    /// Payment URI for an input address, e.g. `bitcoin:1xyz...`.
    pub fn payment_uri(&self, address: &str) -> String {
        format!("{}:{}", self.as_str(), address)
    }
}

impl FromStr for Currency {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SUPPORTED_CURRENCIES
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SdkError::InvalidCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
