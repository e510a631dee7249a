use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub type SlotName = String;

/// The three event kinds the platform delivers. Anything else lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventKind {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(other)]
    Unknown,
}

/// One resolved slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotValue {
    pub value: String,
}

impl SlotValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Request-scoped view of an incoming platform event.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentEvent {
    pub kind: EventKind,
    pub intent_name: Option<String>,
    pub slots: HashMap<SlotName, SlotValue>,
}

impl IntentEvent {
    pub fn launch() -> Self {
        Self {
            kind: EventKind::LaunchRequest,
            intent_name: None,
            slots: HashMap::new(),
        }
    }

    pub fn session_ended() -> Self {
        Self {
            kind: EventKind::SessionEndedRequest,
            intent_name: None,
            slots: HashMap::new(),
        }
    }

    pub fn intent(name: impl Into<String>) -> Self {
        Self {
            kind: EventKind::IntentRequest,
            intent_name: Some(name.into()),
            slots: HashMap::new(),
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), SlotValue::new(value));
        self
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(|s| s.value.as_str())
    }
}

// === Wire format ===

/// Already-parsed webhook body: `{ session, context, request }`. Other top-level
/// fields such as `version` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CekRequest {
    #[serde(default)]
    pub session: CekSession,
    #[serde(default)]
    pub context: Value,
    pub request: CekRequestBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CekSession {
    #[serde(default)]
    pub new: Option<bool>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub session_attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CekRequestBody {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub intent: Option<CekIntent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CekIntent {
    pub name: String,
    #[serde(default)]
    pub slots: Option<HashMap<SlotName, CekSlot>>,
}

/// Slots arrive as `{ name, value }`; a slot the platform could not fill may omit `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct CekSlot {
    #[serde(default)]
    pub value: Option<String>,
}

impl CekRequest {
    /// `context.System.application.applicationId`, when present.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .pointer("/System/application/applicationId")
            .and_then(Value::as_str)
    }

    pub fn to_event(&self) -> IntentEvent {
        let intent = self.request.intent.as_ref();

        let slots = intent
            .and_then(|i| i.slots.as_ref())
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|(name, slot)| {
                        slot.value
                            .as_ref()
                            .map(|v| (name.clone(), SlotValue::new(v.clone())))
                    })
                    .collect()
            })
            .unwrap_or_default();

        IntentEvent {
            kind: self.request.kind,
            intent_name: intent.map(|i| i.name.clone()),
            slots,
        }
    }
}
