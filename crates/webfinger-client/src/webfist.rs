//! WebFist escape: ask webfist.org where the user's JRD lives, then fetch it.

use std::time::Duration;

use tracing::{debug, warn};
use webfinger_jrd::{normalize, Link, LookupResult, Relation};

use crate::address::Address;
use crate::error::WebFingerError;
use crate::retry::RetryState;
use crate::transport::{fetch_jrd, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WebfistStage {
    /// Waiting on the WebFist server's JRD for the address.
    AwaitingIndex { url: String },
    /// Waiting on the JRD the WebFist link points at.
    AwaitingTarget { url: String },
}

enum Step {
    Next(WebfistStage),
    Done(LookupResult),
}

/// Run the escape from `state` to a terminal result.
///
/// Any failure ends the lookup; nothing here falls back further.
pub(crate) async fn resolve(
    transport: &dyn Transport,
    timeout: Duration,
    address: &Address,
    state: &RetryState,
) -> Result<LookupResult, WebFingerError> {
    let mut stage = WebfistStage::AwaitingIndex {
        url: state.url(address),
    };
    loop {
        match advance(transport, timeout, stage).await {
            Ok(Step::Next(next)) => stage = next,
            Ok(Step::Done(result)) => return Ok(result),
            Err(err) => {
                warn!(%address, error = %err, "webfist fallback failed");
                return Err(err);
            }
        }
    }
}

async fn advance(
    transport: &dyn Transport,
    timeout: Duration,
    stage: WebfistStage,
) -> Result<Step, WebFingerError> {
    match stage {
        WebfistStage::AwaitingIndex { url } => {
            debug!(url = %url, "querying webfist");
            let body = fetch_jrd(transport, &url, timeout).await?;
            let index = normalize(&body).map_err(|e| WebFingerError::from_jrd(e, &url))?;
            let href = index
                .idx
                .links
                .first(Relation::Webfist)
                .and_then(Link::href)
                .ok_or_else(|| WebFingerError::NoLinksFound {
                    rel: Relation::Webfist.to_string(),
                })?;
            Ok(Step::Next(WebfistStage::AwaitingTarget {
                url: href.to_string(),
            }))
        }
        WebfistStage::AwaitingTarget { url } => {
            debug!(url = %url, "fetching jrd from webfist link");
            let body = fetch_jrd(transport, &url, timeout).await?;
            let result = normalize(&body).map_err(|e| WebFingerError::from_jrd(e, &url))?;
            Ok(Step::Done(result))
        }
    }
}
