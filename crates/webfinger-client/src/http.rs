//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::Url;

use crate::transport::{FetchError, RawResponse, Transport};

/// Maximum redirect hops followed for one request.
const MAX_REDIRECTS: usize = 10;

/// HTTP transport built on a shared `reqwest::Client`.
///
/// Redirects are followed only to `https` targets. A redirect anywhere else
/// is returned as-is and surfaces as a request error with the 3xx status.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(Policy::custom(|attempt| {
                let decision = redirect_decision(attempt.previous(), attempt.url());
                match decision {
                    RedirectDecision::Follow => attempt.follow(),
                    RedirectDecision::Stop => attempt.stop(),
                    RedirectDecision::TooMany => attempt.error("too many redirects"),
                }
            }))
            .user_agent(concat!("webfinger-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, custom roots, ...). Its redirect
    /// policy is used unchanged.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RedirectDecision {
    Follow,
    Stop,
    TooMany,
}

/// `previous` holds the initial URL followed by every hop already taken.
fn redirect_decision(previous: &[Url], next: &Url) -> RedirectDecision {
    if previous.len() > MAX_REDIRECTS {
        RedirectDecision::TooMany
    } else if next.scheme() == "https" {
        RedirectDecision::Follow
    } else {
        RedirectDecision::Stop
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, accept: &str) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| FetchError::connection(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::connection(url, e.to_string()))?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The initial URL plus `hops` redirects already followed.
    fn chain(hops: usize) -> Vec<Url> {
        (0..=hops)
            .map(|i| Url::parse(&format!("https://example.com/{i}")).unwrap())
            .collect()
    }

    fn https_target() -> Url {
        Url::parse("https://example.net/.well-known/webfinger").unwrap()
    }

    #[test]
    fn follows_first_https_redirect() {
        assert_eq!(
            redirect_decision(&chain(0), &https_target()),
            RedirectDecision::Follow
        );
    }

    #[test]
    fn follows_tenth_redirect() {
        assert_eq!(
            redirect_decision(&chain(9), &https_target()),
            RedirectDecision::Follow
        );
    }

    #[test]
    fn refuses_eleventh_redirect() {
        assert_eq!(
            redirect_decision(&chain(10), &https_target()),
            RedirectDecision::TooMany
        );
    }

    #[test]
    fn stops_at_plain_http_target() {
        let target = Url::parse("http://example.net/.well-known/webfinger").unwrap();
        assert_eq!(redirect_decision(&chain(0), &target), RedirectDecision::Stop);
    }
}
