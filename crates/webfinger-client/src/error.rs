use thiserror::Error;
use webfinger_jrd::{JrdError, UnknownRelation};

use crate::transport::{FetchError, FetchErrorKind};

/// Errors surfaced by [`crate::WebFinger`].
///
/// Network and protocol variants carry the URL of the request that failed.
#[derive(Debug, Error)]
pub enum WebFingerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("error during request: {url}{}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Request {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("invalid json: {url}")]
    InvalidJson { url: String },

    #[error("{message}")]
    ServerReported { url: String, message: String },

    #[error("unknown response from server: {url}")]
    UnknownResponseShape { url: String },

    #[error("unsupported rel {0}")]
    UnsupportedRelation(String),

    #[error("no links found with rel=\"{rel}\"")]
    NoLinksFound { rel: String },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[from] reqwest::Error),
}

/// Field-less tag for [`WebFingerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Request,
    Timeout,
    InvalidJson,
    ServerReported,
    UnknownResponseShape,
    UnsupportedRelation,
    NoLinksFound,
    ClientSetup,
}

impl WebFingerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WebFingerError::InvalidInput(_) => ErrorKind::InvalidInput,
            WebFingerError::NotFound { .. } => ErrorKind::NotFound,
            WebFingerError::Request { .. } => ErrorKind::Request,
            WebFingerError::Timeout { .. } => ErrorKind::Timeout,
            WebFingerError::InvalidJson { .. } => ErrorKind::InvalidJson,
            WebFingerError::ServerReported { .. } => ErrorKind::ServerReported,
            WebFingerError::UnknownResponseShape { .. } => ErrorKind::UnknownResponseShape,
            WebFingerError::UnsupportedRelation(_) => ErrorKind::UnsupportedRelation,
            WebFingerError::NoLinksFound { .. } => ErrorKind::NoLinksFound,
            WebFingerError::ClientSetup(_) => ErrorKind::ClientSetup,
        }
    }

    /// URL of the request that produced this error, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            WebFingerError::NotFound { url }
            | WebFingerError::Request { url, .. }
            | WebFingerError::Timeout { url }
            | WebFingerError::InvalidJson { url }
            | WebFingerError::ServerReported { url, .. }
            | WebFingerError::UnknownResponseShape { url } => Some(url),
            _ => None,
        }
    }

    /// HTTP status code, for errors raised from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            WebFingerError::NotFound { .. } => Some(404),
            WebFingerError::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Attach the request URL to a normalization failure.
    pub(crate) fn from_jrd(err: JrdError, url: &str) -> Self {
        let url = url.to_string();
        match err {
            JrdError::ServerReported { message } => WebFingerError::ServerReported { url, message },
            JrdError::UnknownResponseShape => WebFingerError::UnknownResponseShape { url },
        }
    }
}

impl From<FetchError> for WebFingerError {
    fn from(err: FetchError) -> Self {
        let FetchError {
            kind,
            url,
            status,
            message,
        } = err;
        match kind {
            FetchErrorKind::NotFound => WebFingerError::NotFound { url },
            FetchErrorKind::Request => WebFingerError::Request {
                url,
                status,
                message,
            },
            FetchErrorKind::Timeout => WebFingerError::Timeout { url },
            FetchErrorKind::InvalidJson => WebFingerError::InvalidJson { url },
        }
    }
}

impl From<UnknownRelation> for WebFingerError {
    fn from(err: UnknownRelation) -> Self {
        WebFingerError::UnsupportedRelation(err.0)
    }
}
