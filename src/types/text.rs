use serde::{Deserialize, Serialize};

/// Free text the catalog sends either bare or wrapped as
/// `{"type": "/type/text", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Typed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind:  Option<String>,
        value: String,
    },
}

impl TextValue {
    pub fn as_str(&self) -> &str {
        match self {
            TextValue::Plain(s) => s,
            TextValue::Typed { value, .. } => value,
        }
    }

    /// Normalized text, `None` when the field is missing or empty.
    pub fn normalize(text: Option<&TextValue>) -> Option<&str> {
        text.map(TextValue::as_str).filter(|s| !s.trim().is_empty())
    }
}
