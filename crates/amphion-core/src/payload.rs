use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::error::AmphionError;

/// Shape of the argument handed to a prefill-capable chat command.
///
/// Hosts disagree on which field carries the text, so each shape is tried in
/// [`PayloadKind::ORDER`] until one is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    QueryObject,
    PromptObject,
    TextObject,
    InputObject,
    String,
}

impl PayloadKind {
    pub const ORDER: [PayloadKind; 5] = [
        PayloadKind::QueryObject,
        PayloadKind::PromptObject,
        PayloadKind::TextObject,
        PayloadKind::InputObject,
        PayloadKind::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::QueryObject => "query-object",
            PayloadKind::PromptObject => "prompt-object",
            PayloadKind::TextObject => "text-object",
            PayloadKind::InputObject => "input-object",
            PayloadKind::String => "string",
        }
    }

    /// Build the payload value of this shape carrying `text`.
    pub fn build(self, text: &str) -> Value {
        match self {
            PayloadKind::QueryObject => json!({ "query": text }),
            PayloadKind::PromptObject => json!({ "prompt": text }),
            PayloadKind::TextObject => json!({ "text": text }),
            PayloadKind::InputObject => json!({ "input": text }),
            PayloadKind::String => Value::String(text.to_string()),
        }
    }

    /// Recognize the shape of a payload value, if it is one of ours.
    pub fn of(value: &Value) -> Option<PayloadKind> {
        match value {
            Value::String(_) => Some(PayloadKind::String),
            Value::Object(map) if map.len() == 1 => {
                let key = map.keys().next()?;
                match key.as_str() {
                    "query" => Some(PayloadKind::QueryObject),
                    "prompt" => Some(PayloadKind::PromptObject),
                    "text" => Some(PayloadKind::TextObject),
                    "input" => Some(PayloadKind::InputObject),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PayloadKind {
    type Err = AmphionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadKind::ORDER
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AmphionError::UnknownPayloadKind(s.to_string()))
    }
}

/// A tagged payload ready to pass to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadVariant {
    pub kind: PayloadKind,
    pub value: Value,
}

/// Every payload shape for `text`, in probing order.
pub fn payload_variants(text: &str) -> Vec<PayloadVariant> {
    PayloadKind::ORDER
        .into_iter()
        .map(|kind| PayloadVariant {
            kind,
            value: kind.build(text),
        })
        .collect()
}
