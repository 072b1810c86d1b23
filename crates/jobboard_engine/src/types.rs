use std::fmt;

use serde::Deserialize;

use crate::payload::{flexible_labels, flexible_optional_text, flexible_text};

/// One posting as decoded from the text payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PostingRecord {
    #[serde(default, deserialize_with = "flexible_text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "flexible_text")]
    pub role: String,
    #[serde(default, deserialize_with = "flexible_optional_text")]
    pub years_of_experience: Option<String>,
    #[serde(default, deserialize_with = "flexible_labels")]
    pub batch_eligible: Vec<String>,
    #[serde(default, deserialize_with = "flexible_text")]
    pub apply_link: String,
    #[serde(default, deserialize_with = "flexible_optional_text")]
    pub salary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Outcome of one `fetch_updates` request, postings in received order.
    UpdatesFetched {
        request_id: u64,
        result: Result<Vec<PostingRecord>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // The upstream message is what the user needs to see.
            FailureKind::ServiceUnavailable => write!(f, "{}", self.message),
            _ => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    ServiceUnavailable,
    UnexpectedShape,
    MalformedPayload,
    /// The fetch task ended without a result.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::ServiceUnavailable => write!(f, "service unavailable"),
            FailureKind::UnexpectedShape => write!(f, "unexpected response shape"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::Aborted => write!(f, "request aborted"),
        }
    }
}
