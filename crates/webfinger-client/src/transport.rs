//! The network seam: one GET, classified.
//!
//! A [`Transport`] only moves bytes. [`fetch_jrd`] owns the deadline, status
//! classification, and the JSON check, so every transport behaves the same.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::IgnoredAny;
use tracing::debug;

/// `Accept` header sent with every lookup request.
pub const ACCEPT_JRD: &str = "application/jrd+json, application/json";

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// User-replaceable network layer.
///
/// Implementations perform a single HTTP GET and report connection-level
/// failures as [`FetchErrorKind::Request`] with no status. Dropping the
/// returned future must abandon the request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, accept: &str) -> Result<RawResponse, FetchError>;
}

/// Classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// HTTP 404.
    NotFound,
    /// Any other non-2xx status, or a connection failure.
    Request,
    Timeout,
    /// The response body is not JSON.
    InvalidJson,
}

/// Transport-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub url: String,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, url: impl Into<String>) -> Self {
        let message = match kind {
            FetchErrorKind::NotFound => "resource not found",
            FetchErrorKind::Request => "error during request",
            FetchErrorKind::Timeout => "request timed out",
            FetchErrorKind::InvalidJson => "invalid json",
        };
        Self {
            kind,
            url: url.into(),
            status: None,
            message: message.to_string(),
        }
    }

    /// Error for an HTTP response with a non-success status.
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let kind = if status == 404 {
            FetchErrorKind::NotFound
        } else {
            FetchErrorKind::Request
        };
        Self {
            status: Some(status),
            ..Self::new(kind, url)
        }
    }

    /// Error for a request that never produced an HTTP response.
    pub fn connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::new(FetchErrorKind::Request, url)
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.url)
    }
}

impl std::error::Error for FetchError {}

/// Fetch `url` and return its body if it is a successful JSON response.
///
/// The request races a `timeout` timer; if the timer wins, the request
/// future is dropped and [`FetchErrorKind::Timeout`] is returned.
pub async fn fetch_jrd(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let response = match tokio::time::timeout(timeout, transport.get(url, ACCEPT_JRD)).await {
        Ok(response) => response?,
        Err(_) => {
            debug!(url, ?timeout, "request timed out");
            return Err(FetchError::new(FetchErrorKind::Timeout, url));
        }
    };

    if !(200..300).contains(&response.status) {
        return Err(FetchError::from_status(url, response.status));
    }

    if serde_json::from_str::<IgnoredAny>(&response.body).is_err() {
        return Err(FetchError::new(FetchErrorKind::InvalidJson, url));
    }

    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedTransport};

    const URL: &str = "https://example.com/.well-known/webfinger?resource=acct:alice@example.com";

    async fn fetch(transport: &ScriptedTransport) -> Result<String, FetchError> {
        fetch_jrd(transport, URL, Duration::from_millis(100)).await
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let transport = ScriptedTransport::new().reply(URL, Reply::body(r#"{"links":[]}"#));
        assert_eq!(fetch(&transport).await.unwrap(), r#"{"links":[]}"#);
    }

    #[tokio::test]
    async fn sends_jrd_accept_header() {
        let transport = ScriptedTransport::new().reply(URL, Reply::body("{}"));
        fetch(&transport).await.unwrap();
        assert_eq!(transport.accept_headers(), vec![ACCEPT_JRD.to_string()]);
    }

    #[tokio::test]
    async fn accepts_any_2xx() {
        let transport = ScriptedTransport::new().reply(URL, Reply::Status(203, "{}".into()));
        assert!(fetch(&transport).await.is_ok());
    }

    #[tokio::test]
    async fn classifies_404_as_not_found() {
        let transport = ScriptedTransport::new().reply(URL, Reply::Status(404, String::new()));
        let err = fetch(&transport).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::NotFound);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.url, URL);
    }

    #[tokio::test]
    async fn classifies_other_status_as_request_error() {
        let transport = ScriptedTransport::new().reply(URL, Reply::Status(500, "{}".into()));
        let err = fetch(&transport).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Request);
        assert_eq!(err.status, Some(500));
    }

    #[tokio::test]
    async fn passes_connection_errors_through() {
        let transport = ScriptedTransport::new();
        let err = fetch(&transport).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Request);
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn rejects_non_json_body() {
        let transport = ScriptedTransport::new().reply(URL, Reply::body("<html></html>"));
        let err = fetch(&transport).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::InvalidJson);
        assert_eq!(err.to_string(), format!("invalid json ({URL})"));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_slow_responses() {
        let transport = ScriptedTransport::new().reply(
            URL,
            Reply::Delayed(Duration::from_secs(30), Box::new(Reply::body("{}"))),
        );
        let err = fetch(&transport).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Timeout);
        assert_eq!(transport.requests(), vec![URL.to_string()]);
    }
}
