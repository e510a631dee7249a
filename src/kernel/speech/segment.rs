use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    PlainText,
    #[serde(rename = "URL")]
    AudioUrl,
}

/// One utterance or audio clip. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechSegment {
    #[serde(rename = "type")]
    kind: SegmentKind,
    lang: String,
    value: String,
}

impl SpeechSegment {
    pub fn new(kind: SegmentKind, lang: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            lang: lang.into(),
            value: value.into(),
        }
    }

    pub fn plain_text(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(SegmentKind::PlainText, lang, text)
    }

    pub fn audio_url(lang: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(SegmentKind::AudioUrl, lang, url)
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// What `append_segment` accepts: bare text (wrapped in the response language)
/// or an already-built segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentInput {
    Text(String),
    Segment(SpeechSegment),
}

impl From<&str> for SegmentInput {
    fn from(text: &str) -> Self {
        SegmentInput::Text(text.to_string())
    }
}

impl From<String> for SegmentInput {
    fn from(text: String) -> Self {
        SegmentInput::Text(text)
    }
}

impl From<SpeechSegment> for SegmentInput {
    fn from(segment: SpeechSegment) -> Self {
        SegmentInput::Segment(segment)
    }
}
