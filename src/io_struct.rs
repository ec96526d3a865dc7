use serde::{Deserialize, Serialize};
use serde_json::Value;

const SPEAKER_FIELDS: [&str; 2] = ["user_name", "speaker"];
const TEXT_FIELDS: [&str; 2] = ["message", "text"];

/// One upstream message record, reduced to the two fields the corpus needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub speaker: Option<String>,
    pub text: Option<String>,
}

pub type MessageBatch = Vec<Message>;

impl Message {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Message {
            speaker: Some(speaker.into()),
            text: Some(text.into()),
        }
    }

    /// Best-effort extraction; non-object records yield an empty message.
    pub fn from_record(record: &Value) -> Self {
        Message {
            speaker: lookup(record, &SPEAKER_FIELDS),
            text: lookup(record, &TEXT_FIELDS),
        }
    }
}

fn lookup(record: &Value, fields: &[&str]) -> Option<String> {
    let object = record.as_object()?;
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

#[derive(Debug, Deserialize)]
pub struct AskQuery {
    pub question: String,
}

/// Body of every `/ask` reply: exactly one of `answer` or `error`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AskResponse {
    Answer { answer: String },
    Error { error: String },
}

impl AskResponse {
    pub fn answer(answer: impl Into<String>) -> Self {
        AskResponse::Answer {
            answer: answer.into(),
        }
    }

    pub fn error(error: impl ToString) -> Self {
        AskResponse::Error {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
