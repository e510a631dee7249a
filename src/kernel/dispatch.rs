use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dice::{narration_text, parse_dice_count, result_text, throw_dice};
use super::event::{EventKind, IntentEvent};
use super::random::{RandomSource, ThreadRandom};
use super::speech::{DialogueResponse, SpeechSegment};
use super::template::ResponseTemplates;

pub const GREETING: &str = "こんにちは．";
pub const FAREWELL: &str = "サイコロを終了します。";
pub const DICE_SOUND_FILE: &str = "rolling_dice_sound.mp3";

pub const THROW_DICE_INTENT: &str = "ThrowDiceIntent";
pub const DICE_COUNT_SLOT: &str = "diceCount";

#[derive(Debug, Clone)]
pub struct DialogueConfig {
    pub lang: String,
    /// Prefix for audio segment URLs, without trailing `/`.
    pub base_audio_url: String,
    /// Intents that close the session after their content is spoken.
    pub terminal_intents: HashSet<String>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            lang: "ja".to_string(),
            base_audio_url: "http://localhost:8000".to_string(),
            terminal_intents: HashSet::from(["Clova.CancelIntent".to_string()]),
        }
    }
}

/// Intents computed in code rather than looked up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuiltinIntent {
    ThrowDice,
}

impl BuiltinIntent {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            THROW_DICE_INTENT => Some(Self::ThrowDice),
            _ => None,
        }
    }
}

/// Turns one event into one response. Holds only shared read-only state, so a
/// single instance serves every request.
pub struct Dispatcher {
    config: DialogueConfig,
    templates: Arc<ResponseTemplates>,
    rng: Arc<dyn RandomSource>,
}

impl Dispatcher {
    pub fn new(config: DialogueConfig, templates: Arc<ResponseTemplates>) -> Self {
        Self::with_random(config, templates, Arc::new(ThreadRandom::new()))
    }

    pub fn with_random(
        config: DialogueConfig,
        templates: Arc<ResponseTemplates>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            templates,
            rng,
        }
    }

    /// Always yields a well-formed response; unknown events leave it untouched.
    pub fn handle(&self, event: &IntentEvent) -> DialogueResponse {
        let mut response = DialogueResponse::new(self.config.lang.clone());

        match event.kind {
            EventKind::LaunchRequest => self.launch(&mut response),
            EventKind::IntentRequest => self.intent(event, &mut response),
            EventKind::SessionEndedRequest => self.session_ended(&mut response),
            EventKind::Unknown => warn!("Unrecognized event type, no content produced"),
        }

        response
    }

    fn launch(&self, response: &mut DialogueResponse) {
        info!("launchRequest");
        response.set_single_utterance(GREETING);
        response.continue_session(None);
    }

    fn session_ended(&self, response: &mut DialogueResponse) {
        info!("sessionEndedRequest");
        response.set_single_utterance(FAREWELL);
        response.end_session();
    }

    fn intent(&self, event: &IntentEvent, response: &mut DialogueResponse) {
        let Some(name) = event.intent_name.as_deref() else {
            warn!("IntentRequest without intent name");
            response.continue_session(None);
            return;
        };
        info!(intent = name, slots = event.slots.len(), "intentRequest");

        match BuiltinIntent::from_name(name) {
            Some(BuiltinIntent::ThrowDice) => self.dice_turn(event, response),
            None => self.templated(name, event, response),
        }

        if self.config.terminal_intents.contains(name) {
            response.end_session();
        } else {
            response.continue_session(None);
        }
    }

    fn dice_turn(&self, event: &IntentEvent, response: &mut DialogueResponse) {
        let count = parse_dice_count(event.slot(DICE_COUNT_SLOT));
        response.append_segment(narration_text(count));
        response.append_segment(SpeechSegment::audio_url(
            self.config.lang.clone(),
            format!("{}/{}", self.config.base_audio_url, DICE_SOUND_FILE),
        ));

        let throw = throw_dice(count, self.rng.as_ref());
        response.append_segment(result_text(&throw));
    }

    fn templated(&self, name: &str, event: &IntentEvent, response: &mut DialogueResponse) {
        match self.templates.resolve(name, &event.slots, self.rng.as_ref()) {
            Some(content) => {
                let segment =
                    content.into_segment(&self.config.lang, &self.config.base_audio_url);
                response.append_segment(segment);
            }
            None => debug!(intent = name, "No template content resolved"),
        }
    }
}
