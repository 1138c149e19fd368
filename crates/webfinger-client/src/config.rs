use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-attempt timeout, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Configuration for [`crate::WebFinger`].
///
/// Every field is optional when deserialized; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebFingerConfig {
    /// Never downgrade from `https` to `http` (default: false)
    pub tls_only: bool,
    /// Try `host-meta` and `host-meta.json` after `webfinger` fails (default: false)
    pub uri_fallback: bool,
    /// Ask webfist.org once every direct attempt has failed (default: false)
    pub webfist_fallback: bool,
    /// Per-attempt timeout in milliseconds (default: 10000)
    pub request_timeout: u64,
}

impl Default for WebFingerConfig {
    fn default() -> Self {
        Self {
            tls_only: false,
            uri_fallback: false,
            webfist_fallback: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl WebFingerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout)
    }
}
