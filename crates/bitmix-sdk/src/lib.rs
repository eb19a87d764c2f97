//! Client for the bitmix.biz Bitcoin mixer API.
//!
//! ```rust,no_run
//! use bitmix_sdk::{ClientConfig, MixClient};
//!
//! #[tokio::main]
//! async fn main() -> bitmix_sdk::Result<()> {
//!     let client = MixClient::new(ClientConfig::default())?;
//!
//!     let order = client.mix("bitcoin", "1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await?;
//!     println!("send coins to {} (order {})", order.address, order.id);
//!     println!("{}", client.letter_of_guarantee(&order.id).await?);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod order;

pub use bitmix_network::{Payload, ProxyMode};
pub use client::MixClient;
pub use config::{ClientConfig, DEFAULT_AFFILIATE, DEFAULT_ENDPOINT, DEFAULT_ONION_ENDPOINT};
pub use currency::Currency;
pub use error::{Result, SdkError};
pub use order::{CreateOrderRequest, Order};
