use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::currency::Currency;
use crate::error::{Result, SdkError};

/// Body of `POST /api/order/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub address: Vec<String>,
    pub delay: u32,
    pub tax: f64,
    pub coin: Currency,
    #[serde(rename = "ref")]
    pub affiliate: Option<String>,
}

impl CreateOrderRequest {
    pub fn new(
        currency: Currency,
        output_address: &str,
        delay: u32,
        fee: f64,
        affiliate: Option<String>,
    ) -> Self {
        Self {
            address: vec![output_address.to_string()],
            delay,
            tax: fee,
            coin: currency,
            affiliate,
        }
    }
}

/// A created mix order: where to send funds and the id used to look it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub address: String,
}

impl Order {
    /// Picks `id` and `input_address` out of a create-order response.
    pub fn from_response(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| SdkError::InvalidResponse(value.to_string()))?;

        let id = map
            .get("id")
            .and_then(scalar_to_string)
            .ok_or_else(|| SdkError::InvalidResponse(format!("missing order id in {}", value)))?;
        let address = map
            .get("input_address")
            .and_then(scalar_to_string)
            .ok_or_else(|| {
                SdkError::InvalidResponse(format!("missing input_address in {}", value))
            })?;

        Ok(Self { id, address })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
