use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, FetchError};

/// Upstream code that is reported to the user as-is.
pub const SERVICE_UNAVAILABLE: i64 = 503;

#[derive(Debug, Deserialize)]
struct UpdatesEnvelope {
    messages: MessagesBody,
}

#[derive(Debug, Deserialize)]
struct MessagesBody {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default)]
struct UpstreamError {
    code: Option<i64>,
    message: Option<String>,
}

impl MessagesBody {
    /// Accepts `error: {code, message}` and `error: <code>` next to `message`.
    fn upstream_error(&self) -> Option<UpstreamError> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::Object(fields) => Some(UpstreamError {
                code: fields.get("code").and_then(Value::as_i64),
                message: fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            Value::Number(code) => Some(UpstreamError {
                code: code.as_i64(),
                message: self.message.clone(),
            }),
            Value::String(message) => Some(UpstreamError {
                code: None,
                message: Some(message.clone()),
            }),
            other => Some(UpstreamError {
                code: None,
                message: Some(other.to_string()),
            }),
        }
    }

    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Decodes the updates response body and returns the inner text payload.
///
/// A 503 error descriptor becomes `FailureKind::ServiceUnavailable` carrying
/// the upstream message. Other error codes only matter when no payload text
/// is present.
pub fn extract_payload_text(body: &[u8]) -> Result<String, FetchError> {
    let envelope: UpdatesEnvelope = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::UnexpectedShape, err.to_string()))?;
    let messages = envelope.messages;
    let upstream = messages.upstream_error();

    if let Some(error) = upstream.as_ref() {
        if error.code == Some(SERVICE_UNAVAILABLE) {
            let message = error
                .message
                .clone()
                .unwrap_or_else(|| FailureKind::ServiceUnavailable.to_string());
            return Err(FetchError::new(FailureKind::ServiceUnavailable, message));
        }
    }

    match messages.first_text() {
        Some(text) => Ok(text),
        None => {
            let message = match upstream {
                Some(UpstreamError { code, message }) => format!(
                    "upstream error {}: {}",
                    code.map_or_else(|| "?".to_string(), |code| code.to_string()),
                    message.as_deref().unwrap_or("no message")
                ),
                None => "missing candidates[0].content.parts[0].text".to_string(),
            };
            Err(FetchError::new(FailureKind::UnexpectedShape, message))
        }
    }
}
