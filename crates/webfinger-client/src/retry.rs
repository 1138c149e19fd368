//! Fallback cursor for a single lookup.
//!
//! Order of attempts: well-known endpoints (with `uri_fallback`), then the
//! same endpoints over plain `http` (unless `tls_only`), then the WebFist
//! escape (with `webfist_fallback`).

use std::fmt;

use crate::address::Address;
use crate::config::WebFingerConfig;

/// Host queried by the WebFist escape.
pub const WEBFIST_HOST: &str = "webfist.org";

/// Well-known endpoints, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    WebFinger,
    HostMeta,
    HostMetaJson,
}

impl Endpoint {
    pub fn suffix(self) -> &'static str {
        match self {
            Endpoint::WebFinger => "webfinger",
            Endpoint::HostMeta => "host-meta",
            Endpoint::HostMetaJson => "host-meta.json",
        }
    }

    fn next(self) -> Option<Endpoint> {
        match self {
            Endpoint::WebFinger => Some(Endpoint::HostMeta),
            Endpoint::HostMeta => Some(Endpoint::HostMetaJson),
            Endpoint::HostMetaJson => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Https,
    Http,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        })
    }
}

/// Where the next attempt goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    pub endpoint: Endpoint,
    pub protocol: Protocol,
    pub host: String,
}

/// Outcome of a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Try again at the new position.
    Retry(RetryState),
    /// Leave the direct chain and run the WebFist escape from this position.
    Webfist(RetryState),
    /// Nothing left to try; surface the failure.
    GiveUp,
}

impl RetryState {
    /// First attempt: the `webfinger` endpoint over `https`, or `http` for
    /// localhost.
    pub fn initial(address: &Address) -> Self {
        Self {
            endpoint: Endpoint::WebFinger,
            protocol: if address.is_localhost() {
                Protocol::Http
            } else {
                Protocol::Https
            },
            host: address.host().to_string(),
        }
    }

    pub fn url(&self, address: &Address) -> String {
        format!(
            "{}://{}/.well-known/{}?resource={}",
            self.protocol,
            self.host,
            self.endpoint.suffix(),
            address.resource()
        )
    }

    fn on_webfist_host(&self) -> bool {
        self.host == WEBFIST_HOST
    }

    /// Decide what follows a failed attempt at this position.
    pub fn on_failure(&self, config: &WebFingerConfig) -> Transition {
        if config.uri_fallback && !self.on_webfist_host() {
            if let Some(endpoint) = self.endpoint.next() {
                return Transition::Retry(RetryState {
                    endpoint,
                    ..self.clone()
                });
            }
        }

        if !config.tls_only && self.protocol == Protocol::Https {
            return Transition::Retry(RetryState {
                endpoint: Endpoint::WebFinger,
                protocol: Protocol::Http,
                host: self.host.clone(),
            });
        }

        if config.webfist_fallback && !self.on_webfist_host() {
            return Transition::Webfist(RetryState {
                endpoint: Endpoint::WebFinger,
                protocol: Protocol::Http,
                host: WEBFIST_HOST.to_string(),
            });
        }

        Transition::GiveUp
    }
}
