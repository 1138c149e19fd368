use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::WebFingerError;

static LOCALHOST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^localhost(\.localdomain)?(:[0-9]+)?$").ok());

/// A lookup target: `user@host` or an absolute URI such as
/// `https://host/path`.
///
/// The host is derived once with whitespace removed; the address itself is
/// sent to the server exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    raw: String,
    host: String,
    has_scheme: bool,
}

impl Address {
    /// # Errors
    /// Returns [`WebFingerError::InvalidInput`] if no host can be derived.
    pub fn parse(address: &str) -> Result<Address, WebFingerError> {
        if address.trim().is_empty() {
            return Err(WebFingerError::InvalidInput(
                "first parameter must be a user address".to_string(),
            ));
        }

        let compact: String = address.chars().filter(|c| !c.is_whitespace()).collect();
        let has_scheme = address
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty());

        let host = if address.contains("://") {
            compact.split('/').nth(2)
        } else {
            compact.split('@').nth(1)
        };

        match host {
            Some(host) if !host.is_empty() => Ok(Address {
                raw: address.to_string(),
                host: host.to_string(),
                has_scheme,
            }),
            _ => Err(WebFingerError::InvalidInput(format!(
                "cannot derive a host from address {address:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// True when the address carries its own URI scheme.
    pub fn has_scheme(&self) -> bool {
        self.has_scheme
    }

    /// The `resource` query value: the address, prefixed with `acct:`
    /// unless it already has a scheme.
    pub fn resource(&self) -> String {
        if self.has_scheme {
            self.raw.clone()
        } else {
            format!("acct:{}", self.raw)
        }
    }

    /// True for `localhost`, `localhost.localdomain`, optionally with a port.
    pub fn is_localhost(&self) -> bool {
        is_localhost(&self.host)
    }
}

pub(crate) fn is_localhost(host: &str) -> bool {
    LOCALHOST.as_ref().is_some_and(|pattern| pattern.is_match(host))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
