//! HTTP plumbing for the bitmix API: one dispatcher that every remote call
//! goes through, with status classification, fixed-delay retries and
//! automatic Tor routing for `.onion` endpoints.
//!
//! ```rust,no_run
//! use bitmix_network::{Config, Dispatcher};
//!
//! #[tokio::main]
//! async fn main() -> bitmix_network::Result<()> {
//!     let dispatcher = Dispatcher::new(Config::default())?;
//!
//!     // .onion targets go through the SOCKS proxy, everything else is direct
//!     let status = dispatcher
//!         .get("http://bitmixbizymuphkc.onion/api/order/view/abc123", false)
//!         .await?;
//!     println!("{:?}", status);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http_client;
pub mod response;
pub mod routing;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod transport;

pub use config::{Config, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT_SECS, DEFAULT_TOR_SOCKS_ADDR};
pub use dispatcher::{DispatchOptions, Dispatcher};
pub use error::{NetworkError, Result};
pub use http_client::HttpClient;
pub use response::{Outcome, Payload};
pub use routing::{is_onion_url, ProxyMode, Route};
pub use transport::{ApiRequest, Method, RawResponse, Transport};

pub fn dispatcher() -> Result<Dispatcher> {
    Dispatcher::new(Config::default())
}
