//! WebFinger client.
//!
//! Resolves `user@host` addresses and URIs to JSON Resource Descriptors
//! (RFC 7033), falling back through `host-meta` endpoints, plain HTTP, and
//! the WebFist directory as configured.
//!
//! ```no_run
//! # async fn run() -> Result<(), webfinger_client::WebFingerError> {
//! use webfinger_client::{WebFinger, WebFingerConfig};
//!
//! let webfinger = WebFinger::new(WebFingerConfig::default())?;
//! let avatar = webfinger.lookup_link("alice@example.com", "avatar").await?;
//! println!("{:?}", avatar.href());
//! # Ok(())
//! # }
//! ```

mod address;
mod client;
mod config;
mod error;
mod http;
mod retry;
#[cfg(test)]
mod testing;
mod transport;
mod webfist;

pub use address::Address;
pub use client::WebFinger;
pub use config::{WebFingerConfig, DEFAULT_REQUEST_TIMEOUT_MS};
pub use error::{ErrorKind, WebFingerError};
pub use http::HttpTransport;
pub use retry::{Endpoint, Protocol, RetryState, Transition, WEBFIST_HOST};
pub use transport::{fetch_jrd, FetchError, FetchErrorKind, RawResponse, Transport, ACCEPT_JRD};
pub use webfinger_jrd::{
    normalize, JrdError, JrdIndex, JrdProperties, Link, LinkIndex, LookupResult, Relation,
};
