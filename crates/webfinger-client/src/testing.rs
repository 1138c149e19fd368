//! In-memory transport for exercising the lookup state machine.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::transport::{FetchError, RawResponse, Transport};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Status(u16, String),
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub(crate) fn body(body: &str) -> Reply {
        Reply::Status(200, body.to_string())
    }

    pub(crate) fn json(value: serde_json::Value) -> Reply {
        Reply::Status(200, value.to_string())
    }
}

/// Answers from a fixed URL table; any other URL is a refused connection.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// Every requested URL, in request order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub(crate) fn accept_headers(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, accept)| accept.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, accept: &str) -> Result<RawResponse, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), accept.to_string()));

        let mut reply = self.replies.get(url).cloned();
        loop {
            match reply {
                Some(Reply::Delayed(delay, inner)) => {
                    tokio::time::sleep(delay).await;
                    reply = Some(*inner);
                }
                Some(Reply::Status(status, body)) => return Ok(RawResponse { status, body }),
                None => return Err(FetchError::connection(url, "connection refused")),
            }
        }
    }
}
