use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::{FailureKind, FetchError, PostingRecord};

/// Removes markdown code-fence markers wrapped around a payload.
///
/// Drops one leading fence (with an optional language tag such as `json`)
/// and one trailing fence. Surrounding whitespace is trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let tag_len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(rest.len());
            &rest[tag_len..]
        }
        None => trimmed,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a (possibly fenced) JSON array of postings, in received order.
pub fn parse_postings(text: &str) -> Result<Vec<PostingRecord>, FetchError> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::new(
            FailureKind::MalformedPayload,
            format!("expected a JSON array of postings, found {}", value_kind(&value)),
        ));
    }
    serde_json::from_value(value)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Text or number; `null` becomes the empty string.
pub(crate) fn flexible_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number_text(&number),
        Some(other) => other.to_string(),
    })
}

/// Text or number; `null`, `false`, `0` and blank strings count as absent.
pub(crate) fn flexible_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) => {
            (number.as_f64() != Some(0.0)).then(|| number_text(&number))
        }
        Value::String(text) => non_blank(&text),
        other => Some(other.to_string()),
    }))
}

/// Array of text/number labels; a bare label becomes a one-element list.
pub(crate) fn flexible_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(label_of).collect(),
        Some(single) => label_of(&single).into_iter().collect(),
        None => Vec::new(),
    })
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Number(number) => Some(number_text(number)),
        _ => None,
    }
}

/// Integral floats drop the trailing `.0` (`1.0` reads as `1`).
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
