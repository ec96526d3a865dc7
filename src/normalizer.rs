use crate::error::{QaError, QaResult};
use crate::io_struct::{Message, MessageBatch};
use serde_json::Value;

/// Top-level key that may wrap the record array.
pub const ENVELOPE_KEY: &str = "items";

/// Turn a raw upstream body into a batch of messages.
///
/// Accepts either a bare JSON array or an object carrying the array under
/// [`ENVELOPE_KEY`]. Array elements are not validated individually. A
/// non-JSON content-type is logged but decoding is still attempted.
pub fn normalize(body: &[u8], content_type: Option<&str>) -> QaResult<MessageBatch> {
    if !is_json_content_type(content_type) {
        log::warn!(
            "Upstream declared content-type {:?}, decoding as JSON anyway",
            content_type.unwrap_or("<none>")
        );
    }
    let value = decode(body)?;
    let value = match value {
        Value::Object(mut object) => match object.remove(ENVELOPE_KEY) {
            Some(inner) => inner,
            None => {
                return Err(QaError::shape(format!(
                    "expected an array or an object with an '{}' array",
                    ENVELOPE_KEY
                )));
            }
        },
        other => other,
    };
    match value {
        Value::Array(records) => Ok(records.iter().map(Message::from_record).collect()),
        other => Err(QaError::shape(format!(
            "expected an array of messages, got {}",
            kind(&other)
        ))),
    }
}

/// `application/json` and `+json` suffixed types, ignoring parameters.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

fn decode(body: &[u8]) -> QaResult<Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            log::debug!("Strict decode failed ({}), retrying leniently", strict_err);
            let text = String::from_utf8_lossy(body);
            let text = text
                .trim_start_matches('\u{feff}')
                .trim_matches(|c: char| c.is_whitespace() || c == '\0');
            serde_json::from_str::<Value>(text).map_err(QaError::decode)
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
