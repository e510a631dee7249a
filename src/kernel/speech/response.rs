use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::segment::{SegmentInput, SpeechSegment};

pub const RESPONSE_VERSION: &str = "0.1.0";

pub type SessionAttributes = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSpeech {
    /// Nothing said yet. Serializes as `{}`.
    #[default]
    Empty,
    Simple(SpeechSegment),
    List(Vec<SpeechSegment>),
}

impl OutputSpeech {
    pub fn segments(&self) -> &[SpeechSegment] {
        match self {
            OutputSpeech::Empty => &[],
            OutputSpeech::Simple(seg) => std::slice::from_ref(seg),
            OutputSpeech::List(segs) => segs,
        }
    }
}

impl Serialize for OutputSpeech {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutputSpeech::Empty => serializer.serialize_map(Some(0))?.end(),
            OutputSpeech::Simple(seg) => {
                let mut s = serializer.serialize_struct("OutputSpeech", 2)?;
                s.serialize_field("type", "SimpleSpeech")?;
                s.serialize_field("values", seg)?;
                s.end()
            }
            OutputSpeech::List(segs) => {
                let mut s = serializer.serialize_struct("OutputSpeech", 2)?;
                s.serialize_field("type", "SpeechList")?;
                s.serialize_field("values", segs)?;
                s.end()
            }
        }
    }
}

/// Per-request accumulator the turn handlers write into.
///
/// Starts with no speech, `should_end_session = true` and no attributes, so an
/// unhandled turn closes the dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueResponse {
    lang: String,
    speech: OutputSpeech,
    should_end_session: bool,
    session_attributes: SessionAttributes,
}

impl DialogueResponse {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            speech: OutputSpeech::Empty,
            should_end_session: true,
            session_attributes: SessionAttributes::new(),
        }
    }

    /// Replaces all content with exactly one plain-text segment.
    pub fn set_single_utterance(&mut self, text: impl Into<String>) {
        self.speech = OutputSpeech::Simple(SpeechSegment::plain_text(self.lang.clone(), text));
    }

    /// Appends in output order. A prior single utterance becomes the first list element.
    pub fn append_segment(&mut self, input: impl Into<SegmentInput>) {
        let segment = match input.into() {
            SegmentInput::Text(text) => SpeechSegment::plain_text(self.lang.clone(), text),
            SegmentInput::Segment(segment) => segment,
        };

        self.speech = match std::mem::take(&mut self.speech) {
            OutputSpeech::Empty => OutputSpeech::List(vec![segment]),
            OutputSpeech::Simple(first) => OutputSpeech::List(vec![first, segment]),
            OutputSpeech::List(mut segs) => {
                segs.push(segment);
                OutputSpeech::List(segs)
            }
        };
    }

    /// Keeps the dialogue open; `attributes` are shallow-merged (new keys win).
    pub fn continue_session(&mut self, attributes: Option<SessionAttributes>) {
        self.should_end_session = false;
        if let Some(attrs) = attributes {
            for (key, value) in attrs {
                self.session_attributes.insert(key, value);
            }
        }
    }

    pub fn end_session(&mut self) {
        self.should_end_session = true;
        self.session_attributes.clear();
    }

    pub fn speech(&self) -> &OutputSpeech {
        &self.speech
    }

    pub fn should_end_session(&self) -> bool {
        self.should_end_session
    }

    pub fn session_attributes(&self) -> &SessionAttributes {
        &self.session_attributes
    }

    pub fn into_wire(self) -> CekResponse {
        CekResponse {
            version: RESPONSE_VERSION,
            session_attributes: self.session_attributes,
            response: CekResponseBody {
                output_speech: self.speech,
                card: Map::new(),
                directives: Vec::new(),
                should_end_session: self.should_end_session,
            },
        }
    }
}

// === Wire format ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CekResponse {
    pub version: &'static str,
    pub session_attributes: SessionAttributes,
    pub response: CekResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CekResponseBody {
    pub output_speech: OutputSpeech,
    pub card: Map<String, Value>,
    pub directives: Vec<Value>,
    pub should_end_session: bool,
}
