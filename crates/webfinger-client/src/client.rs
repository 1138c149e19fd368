use std::sync::Arc;

use tracing::debug;
use webfinger_jrd::{normalize, Link, LookupResult, Relation};

use crate::address::Address;
use crate::config::WebFingerConfig;
use crate::error::WebFingerError;
use crate::http::HttpTransport;
use crate::retry::{RetryState, Transition};
use crate::transport::{fetch_jrd, Transport};
use crate::webfist;

/// WebFinger client.
///
/// Each lookup walks its own fallback chain; no state is shared between
/// lookups, so one client can serve any number of concurrent callers.
#[derive(Clone)]
pub struct WebFinger {
    config: WebFingerConfig,
    transport: Arc<dyn Transport>,
}

impl WebFinger {
    /// Client backed by [`HttpTransport`].
    pub fn new(config: WebFingerConfig) -> Result<Self, WebFingerError> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(config: WebFingerConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &WebFingerConfig {
        &self.config
    }

    /// Resolve `address` (`user@host` or an absolute URI) to its JRD.
    ///
    /// The address is validated before any request is made. A response that
    /// arrives but cannot be normalized ends the lookup; only transport
    /// failures move the fallback chain forward.
    ///
    /// # Errors
    /// [`WebFingerError::InvalidInput`] for an address with no host, otherwise
    /// the failure of the last attempt.
    pub async fn lookup(&self, address: &str) -> Result<LookupResult, WebFingerError> {
        let address = Address::parse(address)?;
        self.lookup_address(&address).await
    }

    /// [`lookup`](Self::lookup) for an already-parsed address.
    pub async fn lookup_address(&self, address: &Address) -> Result<LookupResult, WebFingerError> {
        let timeout = self.config.request_timeout();
        let mut state = RetryState::initial(address);
        let mut attempt: u32 = 1;

        loop {
            let url = state.url(address);
            debug!(attempt, url = %url, "webfinger request");

            let err = match fetch_jrd(self.transport.as_ref(), &url, timeout).await {
                Ok(body) => {
                    return normalize(&body).map_err(|e| WebFingerError::from_jrd(e, &url));
                }
                Err(err) => err,
            };

            match state.on_failure(&self.config) {
                Transition::Retry(next) => {
                    debug!(
                        error = %err,
                        protocol = %next.protocol,
                        endpoint = next.endpoint.suffix(),
                        "falling back"
                    );
                    state = next;
                    attempt += 1;
                }
                Transition::Webfist(next) => {
                    debug!(error = %err, %address, "falling back to webfist");
                    return webfist::resolve(self.transport.as_ref(), timeout, address, &next).await;
                }
                Transition::GiveUp => {
                    debug!(error = %err, attempts = attempt, "lookup failed");
                    return Err(err.into());
                }
            }
        }
    }

    /// Look up `address` and return its first link under `rel`.
    ///
    /// `rel` is one of the short relation keys (`avatar`, `blog`, ...). An
    /// unknown key fails before any request is made.
    pub async fn lookup_link(&self, address: &str, rel: &str) -> Result<Link, WebFingerError> {
        let relation: Relation = rel.parse()?;
        let result = self.lookup(address).await?;
        result
            .idx
            .links
            .first(relation)
            .cloned()
            .ok_or_else(|| WebFingerError::NoLinksFound {
                rel: relation.to_string(),
            })
    }
}
