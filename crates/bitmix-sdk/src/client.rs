//! Mix order lifecycle against the remote service: create → check → letter.
use bitmix_network::{Dispatcher, HttpClient, Payload, Transport};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::currency::Currency;
use crate::error::{Result, SdkError};
use crate::order::{CreateOrderRequest, Order};

pub struct MixClient<T = HttpClient> {
    config: ClientConfig,
    dispatcher: Dispatcher<T>,
}

impl MixClient<HttpClient> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(config.network.clone())?;
        Ok(Self { config, dispatcher })
    }
}

impl<T: Transport> MixClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let dispatcher = Dispatcher::with_transport(transport, config.network.clone());
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/order/{}", self.config.endpoint, path)
    }

    /// Creates a mix order sending mixed `currency` to `output_address`.
    /// The currency is validated before anything goes over the wire.
    pub async fn mix(&self, currency: &str, output_address: &str) -> Result<Order> {
        let currency: Currency = currency.parse()?;
        if output_address.trim().is_empty() {
            return Err(SdkError::InvalidInput("output address is empty".into()));
        }

        let request = CreateOrderRequest::new(
            currency,
            output_address,
            self.config.delay_minutes,
            self.config.fee,
            self.config.affiliate.clone(),
        );
        let body = serde_json::to_value(&request)
            .map_err(|e| SdkError::InvalidInput(format!("Failed to encode order: {}", e)))?;
        debug!(
            delay = request.delay,
            fee = request.tax,
            "creating {} order",
            currency
        );

        let payload = self
            .dispatcher
            .post(&self.url("create"), &body, self.config.retry)
            .await?;

        let order = match payload {
            Payload::Json(value) => Order::from_response(&value)?,
            Payload::Raw(bytes) => {
                return Err(SdkError::InvalidResponse(
                    String::from_utf8_lossy(&bytes).into_owned(),
                ))
            }
        };
        info!(id = %order.id, "order created");

        Ok(order)
    }

    /// Current state of an order, exactly as the service reports it.
    pub async fn check(&self, id: &str) -> Result<Payload> {
        let id = non_empty_id(id)?;
        let payload = self
            .dispatcher
            .get(&self.url(&format!("view/{}", id)), self.config.retry)
            .await?;
        Ok(payload)
    }

    /// Plain-text letter of guarantee for an order.
    pub async fn letter_of_guarantee(&self, id: &str) -> Result<String> {
        let id = non_empty_id(id)?;
        let payload = self
            .dispatcher
            .get(&self.url(&format!("letter/{}", id)), self.config.retry)
            .await?;

        match payload {
            Payload::Raw(bytes) => String::from_utf8(bytes)
                .map_err(|e| SdkError::InvalidResponse(format!("letter is not UTF-8: {}", e))),
            Payload::Json(Value::String(text)) => Ok(text),
            Payload::Json(other) => Err(SdkError::InvalidResponse(format!(
                "expected a plain-text letter, got {}",
                other
            ))),
        }
    }
}

/// Rejects blank ids; anything else goes into the URL exactly as given.
fn non_empty_id(id: &str) -> Result<&str> {
    if id.trim().is_empty() {
        return Err(SdkError::InvalidInput("order id is empty".into()));
    }
    Ok(id)
}
