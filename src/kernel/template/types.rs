use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::kernel::speech::{SegmentKind, SpeechSegment};

/// The empty key: default branch at any level.
pub const WILDCARD: &str = "";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template document root must be a JSON object")]
    NotAnObject,
    #[error("invalid template node at '{path}': {reason}")]
    InvalidNode { path: String, reason: String },
    #[error("invalid alternative at '{path}': expected a string or a speech segment object")]
    InvalidAlternative { path: String },
    #[error("invalid wildcard at '{path}': expected a list of alternatives")]
    InvalidWildcard { path: String },
    #[error("failed to read template document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse template document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A leaf alternative as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    Text(String),
    /// Structured segment; `lang` may be left for the response to fill in.
    Segment {
        kind: SegmentKind,
        lang: Option<String>,
        value: String,
    },
}

impl TemplateContent {
    /// Materializes a segment, filling a missing language and rooting `/`-relative
    /// audio paths at `base_audio_url`.
    pub fn into_segment(self, lang: &str, base_audio_url: &str) -> SpeechSegment {
        match self {
            TemplateContent::Text(text) => SpeechSegment::plain_text(lang, text),
            TemplateContent::Segment { kind, lang: own, value } => {
                let value = if kind == SegmentKind::AudioUrl && value.starts_with('/') {
                    format!("{}{}", base_audio_url, value)
                } else {
                    value
                };
                SpeechSegment::new(kind, own.unwrap_or_else(|| lang.to_string()), value)
            }
        }
    }
}

/// Load-time classification of one table value.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    Literal(String),
    Alternatives(Vec<TemplateContent>),
    BySlot(SlotBranches),
}

/// A mapping level keyed by slot name. Branch order is document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotBranches {
    pub branches: Vec<SlotBranch>,
    pub wildcard: Option<Vec<TemplateContent>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotBranch {
    pub slot: String,
    pub values: HashMap<String, TemplateNode>,
    /// `""` under the slot: any value of this slot without an exact key.
    pub fallback: Option<Vec<TemplateContent>>,
}

/// The whole table: intent name -> node, plus the root wildcard.
/// Read-only after load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseTemplates {
    pub(crate) intents: HashMap<String, TemplateNode>,
    pub(crate) wildcard: Option<Vec<TemplateContent>>,
}

impl ResponseTemplates {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TemplateError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, TemplateError> {
        let root = value.as_object().ok_or(TemplateError::NotAnObject)?;

        let mut intents = HashMap::new();
        let mut wildcard = None;

        for (key, val) in root {
            if key == WILDCARD {
                wildcard = Some(parse_wildcard(val, "")?);
            } else {
                intents.insert(key.clone(), parse_node(val, key)?);
            }
        }

        Ok(Self { intents, wildcard })
    }

    pub fn intent(&self, name: &str) -> Option<&TemplateNode> {
        self.intents.get(name)
    }

    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }
}

fn parse_node(value: &Value, path: &str) -> Result<TemplateNode, TemplateError> {
    match value {
        Value::String(s) => Ok(TemplateNode::Literal(s.clone())),
        Value::Array(items) => Ok(TemplateNode::Alternatives(parse_alternatives(items, path)?)),
        Value::Object(map) => Ok(TemplateNode::BySlot(parse_slot_level(map, path)?)),
        other => Err(TemplateError::InvalidNode {
            path: path.to_string(),
            reason: format!("unexpected {}", json_kind(other)),
        }),
    }
}

fn parse_slot_level(map: &Map<String, Value>, path: &str) -> Result<SlotBranches, TemplateError> {
    let mut level = SlotBranches::default();

    for (slot, val) in map {
        let slot_path = format!("{}/{}", path, slot);
        if slot == WILDCARD {
            level.wildcard = Some(parse_wildcard(val, &slot_path)?);
            continue;
        }

        let by_value = val.as_object().ok_or_else(|| TemplateError::InvalidNode {
            path: slot_path.clone(),
            reason: format!("slot '{}' must map slot values to nodes", slot),
        })?;

        let mut values = HashMap::with_capacity(by_value.len());
        let mut fallback = None;
        for (slot_value, node) in by_value {
            let node_path = format!("{}/{}", slot_path, slot_value);
            if slot_value == WILDCARD {
                fallback = Some(parse_wildcard(node, &node_path)?);
            } else {
                values.insert(slot_value.clone(), parse_node(node, &node_path)?);
            }
        }

        level.branches.push(SlotBranch {
            slot: slot.clone(),
            values,
            fallback,
        });
    }

    Ok(level)
}

fn parse_wildcard(value: &Value, path: &str) -> Result<Vec<TemplateContent>, TemplateError> {
    match value {
        Value::Array(items) => parse_alternatives(items, path),
        Value::String(s) => Ok(vec![TemplateContent::Text(s.clone())]),
        _ => Err(TemplateError::InvalidWildcard {
            path: path.to_string(),
        }),
    }
}

fn parse_alternatives(items: &[Value], path: &str) -> Result<Vec<TemplateContent>, TemplateError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_content(item, &format!("{}[{}]", path, i)))
        .collect()
}

fn parse_content(value: &Value, path: &str) -> Result<TemplateContent, TemplateError> {
    let invalid = || TemplateError::InvalidAlternative {
        path: path.to_string(),
    };

    match value {
        Value::String(s) => Ok(TemplateContent::Text(s.clone())),
        Value::Object(obj) => {
            let kind = match obj.get("type").and_then(Value::as_str) {
                Some("PlainText") => SegmentKind::PlainText,
                Some("URL") => SegmentKind::AudioUrl,
                _ => return Err(invalid()),
            };
            let value = obj
                .get("value")
                .and_then(Value::as_str)
                .ok_or_else(invalid)?
                .to_string();
            let lang = obj.get("lang").and_then(Value::as_str).map(str::to_string);
            Ok(TemplateContent::Segment { kind, lang, value })
        }
        _ => Err(invalid()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
