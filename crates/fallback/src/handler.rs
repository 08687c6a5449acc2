//! Unknown fallback handler

use crate::FallbackError;
use serde_json::{json, Value};
use skill_host::{
    AddressPolicy, CoreConfig, DataMap, DialogSpeaker, GuiSurface, Message, MessageBus,
    MetricReporter, RuntimeRequirements, SkillSettings,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use vocab::{classify, Category, VocabStore};

/// Bus message requesting the LED animation
pub const LED_ANIMATION_MESSAGE: &str = "neon.linear_led.show_animation";
/// GUI page showing the unmatched utterance
pub const UNKNOWN_INTENT_PAGE: &str = "UnknownIntent.qml";
/// Metric reported for every unmatched utterance
pub const FAILED_INTENT_METRIC: &str = "failed-intent";
/// Dialog spoken when no category matches
pub const UNKNOWN_DIALOG: &str = "unknown";

/// Minimum number of whitespace-separated words worth answering
const MIN_WORDS: usize = 2;

/// Why a call reported "handled"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// Not addressed to the assistant; absorbed silently
    Ignored,
    /// Fewer than two words; likely an accidental activation
    ShortUtterance,
    /// Must-respond request; nothing spoken here
    MustRespond,
    /// A category dialog was spoken
    Classified(Category),
    /// The `unknown` dialog was spoken
    Unknown,
}

impl FallbackOutcome {
    /// Every outcome stops further fallback handlers
    pub fn handled(&self) -> bool {
        true
    }
}

/// Host services the fallback talks to
#[derive(Clone)]
pub struct FallbackServices {
    pub bus: Arc<dyn MessageBus>,
    pub speaker: Arc<dyn DialogSpeaker>,
    pub gui: Arc<dyn GuiSurface>,
    pub metrics: Arc<dyn MetricReporter>,
    pub policy: Arc<dyn AddressPolicy>,
}

/// Fallback for utterances no intent matched
pub struct UnknownFallback {
    services: FallbackServices,
    vocab: VocabStore,
    settings: SkillSettings,
    core: CoreConfig,
}

impl UnknownFallback {
    /// Fallback priority; runs after every other fallback
    pub const PRIORITY: u8 = 100;

    pub fn new(
        services: FallbackServices,
        vocab: VocabStore,
        settings: SkillSettings,
        core: CoreConfig,
    ) -> Self {
        info!(
            "Creating unknown fallback (vocab root {}, settings {:?})",
            vocab.root().display(),
            settings
        );
        Self {
            services,
            vocab,
            settings,
            core,
        }
    }

    /// Load and runtime conditions declared to the host
    pub fn runtime_requirements() -> RuntimeRequirements {
        RuntimeRequirements {
            network_before_load: false,
            internet_before_load: false,
            gui_before_load: false,
            requires_internet: true,
            requires_network: true,
            requires_gui: false,
            no_internet_fallback: true,
            no_network_fallback: true,
            no_gui_fallback: true,
        }
    }

    /// Handle one unmatched utterance.
    ///
    /// Every `Ok` outcome means "handled". Metric and GUI failures are
    /// logged and never returned.
    pub fn handle(&self, message: &Message) -> Result<FallbackOutcome, FallbackError> {
        info!("Unknown fallback checking utterance");
        let utterance = message
            .utterance_text()
            .ok_or(FallbackError::MissingUtterance)?;

        let policy = &self.services.policy;
        if !(policy.is_addressed(message) || policy.must_respond(message)) {
            info!("Ignoring streaming STT or public conversation input");
            return Ok(FallbackOutcome::Ignored);
        }

        if self.settings.emit_led {
            self.services.bus.emit(message.forward(
                LED_ANIMATION_MESSAGE,
                json!({"animation": "blink", "color": "theme"}),
            ));
        }

        if utterance.split_whitespace().count() < MIN_WORDS {
            info!("Ignoring 1-word input: {}", utterance);
            return Ok(FallbackOutcome::ShortUtterance);
        }

        if self.settings.show_utterances {
            self.show_utterance(utterance);
        }

        self.report_failed_intent(utterance);

        debug!("Checking if must respond: {:?}", message.data);
        if policy.must_respond(message) {
            // Mobile web-search redirection belongs to a separate fallback
            if policy.request_from_mobile(message) {
                debug!("Must-respond request from mobile");
            }
            return Ok(FallbackOutcome::MustRespond);
        }

        match classify(&self.vocab, utterance)? {
            Some(matched) => {
                info!("Fallback type: {}", matched.category);
                let mut data = DataMap::new();
                data.insert("remaining".to_string(), Value::String(matched.remaining));
                self.services
                    .speaker
                    .speak_dialog(matched.category.dialog(), &data)?;
                Ok(FallbackOutcome::Classified(matched.category))
            }
            None => {
                self.services
                    .speaker
                    .speak_dialog(UNKNOWN_DIALOG, &DataMap::new())?;
                Ok(FallbackOutcome::Unknown)
            }
        }
    }

    fn show_utterance(&self, utterance: &str) {
        let gui = &self.services.gui;
        let shown = gui
            .set_value("utterance", Value::String(utterance.to_string()))
            .and_then(|_| gui.show_page(UNKNOWN_INTENT_PAGE));
        if let Err(e) = shown {
            warn!("Failed to show utterance: {}", e);
        }
    }

    fn report_failed_intent(&self, utterance: &str) {
        let mut data = DataMap::new();
        data.insert("utterance".to_string(), Value::String(utterance.to_string()));
        data.insert(
            "device".to_string(),
            self.core
                .dev_type
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        if let Err(e) = self
            .services
            .metrics
            .report_metric(FAILED_INTENT_METRIC, &data)
        {
            error!("Failed to report {}: {}", FAILED_INTENT_METRIC, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skill_host::address::{MUST_RESPOND_KEY, SHOULD_RESPOND_KEY};
    use skill_host::testing::{RecordingBus, RecordingGui, RecordingMetrics, RecordingSpeaker};
    use skill_host::ContextAddressPolicy;
    use std::fs;

    struct Harness {
        _dir: tempfile::TempDir,
        bus: Arc<RecordingBus>,
        speaker: Arc<RecordingSpeaker>,
        gui: Arc<RecordingGui>,
        metrics: Arc<RecordingMetrics>,
        fallback: UnknownFallback,
    }

    fn harness_with(
        settings: SkillSettings,
        gui: RecordingGui,
        metrics: RecordingMetrics,
    ) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("question.voc"), "what is\nhow\n").unwrap();
        fs::write(dir.path().join("who.is.voc"), "who is\n").unwrap();
        fs::write(dir.path().join("why.is.voc"), "\nwhy is\n\n").unwrap();

        let bus = Arc::new(RecordingBus::default());
        let speaker = Arc::new(RecordingSpeaker::default());
        let gui = Arc::new(gui);
        let metrics = Arc::new(metrics);
        let services = FallbackServices {
            bus: bus.clone(),
            speaker: speaker.clone(),
            gui: gui.clone(),
            metrics: metrics.clone(),
            policy: Arc::new(ContextAddressPolicy::default()),
        };
        let core = CoreConfig {
            dev_type: Some("pi".to_string()),
        };
        let fallback = UnknownFallback::new(services, VocabStore::new(dir.path()), settings, core);

        Harness {
            _dir: dir,
            bus,
            speaker,
            gui,
            metrics,
            fallback,
        }
    }

    fn harness() -> Harness {
        harness_with(
            SkillSettings::default(),
            RecordingGui::default(),
            RecordingMetrics::default(),
        )
    }

    fn addressed(utterance: &str) -> Message {
        Message::utterance("intent_failure", utterance).with_context(SHOULD_RESPOND_KEY, true)
    }

    #[test]
    fn test_who_is_remaining() {
        let h = harness();
        let outcome = h.fallback.handle(&addressed("who is Einstein")).unwrap();

        assert_eq!(outcome, FallbackOutcome::Classified(Category::WhoIs));
        let spoken = h.speaker.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].0, "who.is");
        assert_eq!(spoken[0].1["remaining"], " Einstein");
    }

    #[test]
    fn test_question_and_why() {
        let h = harness();
        h.fallback.handle(&addressed("what is rust")).unwrap();
        h.fallback.handle(&addressed("why is the sky blue")).unwrap();

        let spoken = h.speaker.spoken();
        assert_eq!(h.speaker.dialogs(), ["question", "why.is"]);
        assert_eq!(spoken[0].1["remaining"], " rust");
        assert_eq!(spoken[1].1["remaining"], " the sky blue");
    }

    #[test]
    fn test_exact_prefix_and_tab_separated() {
        let h = harness();
        h.fallback.handle(&addressed("who is")).unwrap();
        h.fallback.handle(&addressed("how\tcome")).unwrap();

        let spoken = h.speaker.spoken();
        assert_eq!(h.speaker.dialogs(), ["who.is", "question"]);
        assert_eq!(spoken[0].1["remaining"], "");
        assert_eq!(spoken[1].1["remaining"], "\tcome");
    }

    #[test]
    fn test_unknown_when_no_match() {
        let h = harness();
        let outcome = h.fallback.handle(&addressed("play some jazz")).unwrap();

        assert_eq!(outcome, FallbackOutcome::Unknown);
        assert_eq!(h.speaker.dialogs(), ["unknown"]);
        assert!(h.speaker.spoken()[0].1.is_empty());
    }

    #[test]
    fn test_not_addressed_is_absorbed() {
        let h = harness();
        let msg = Message::utterance("intent_failure", "who is Einstein");
        let outcome = h.fallback.handle(&msg).unwrap();

        assert_eq!(outcome, FallbackOutcome::Ignored);
        assert!(outcome.handled());
        assert!(h.speaker.spoken().is_empty());
        assert!(h.metrics.reports().is_empty());
        assert!(h.bus.emitted().is_empty());
    }

    #[test]
    fn test_name_in_utterance_passes_gate() {
        let h = harness();
        let msg = Message::utterance("intent_failure", "neon tell me a secret");
        assert_eq!(h.fallback.handle(&msg).unwrap(), FallbackOutcome::Unknown);
    }

    #[test]
    fn test_metric_reported() {
        let h = harness();
        h.fallback.handle(&addressed("play some jazz")).unwrap();

        let reports = h.metrics.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "failed-intent");
        assert_eq!(reports[0].1["utterance"], "play some jazz");
        assert_eq!(reports[0].1["device"], "pi");
    }

    #[test]
    fn test_metric_failure_does_not_stop_classification() {
        let h = harness_with(
            SkillSettings::default(),
            RecordingGui::default(),
            RecordingMetrics::failing(),
        );
        let outcome = h.fallback.handle(&addressed("who is Einstein")).unwrap();

        assert_eq!(outcome, FallbackOutcome::Classified(Category::WhoIs));
        assert_eq!(h.metrics.reports().len(), 1);
        assert_eq!(h.speaker.dialogs(), ["who.is"]);
    }

    #[test]
    fn test_led_animation_forwarded() {
        let settings = SkillSettings {
            emit_led: true,
            ..Default::default()
        };
        let h = harness_with(settings, RecordingGui::default(), RecordingMetrics::default());
        let msg = addressed("play some jazz").with_context("client", "local");
        h.fallback.handle(&msg).unwrap();

        let emitted = h.bus.emitted();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].msg_type, LED_ANIMATION_MESSAGE);
        assert_eq!(emitted[0].data["animation"], "blink");
        assert_eq!(emitted[0].data["color"], "theme");
        assert_eq!(emitted[0].context, msg.context);
    }

    #[test]
    fn test_led_animation_precedes_length_filter() {
        let settings = SkillSettings {
            emit_led: true,
            ..Default::default()
        };
        let h = harness_with(settings, RecordingGui::default(), RecordingMetrics::default());
        let outcome = h.fallback.handle(&addressed("hello")).unwrap();

        assert_eq!(outcome, FallbackOutcome::ShortUtterance);
        assert_eq!(h.bus.emitted().len(), 1);
        assert!(h.metrics.reports().is_empty());
    }

    #[test]
    fn test_no_led_by_default() {
        let h = harness();
        h.fallback.handle(&addressed("play some jazz")).unwrap();
        assert!(h.bus.emitted().is_empty());
    }

    #[test]
    fn test_show_utterance() {
        let settings = SkillSettings {
            show_utterances: true,
            ..Default::default()
        };
        let h = harness_with(settings, RecordingGui::default(), RecordingMetrics::default());
        h.fallback.handle(&addressed("play some jazz")).unwrap();

        assert_eq!(
            h.gui.values(),
            [("utterance".to_string(), Value::String("play some jazz".to_string()))]
        );
        assert_eq!(h.gui.pages(), [UNKNOWN_INTENT_PAGE]);
    }

    #[test]
    fn test_gui_failure_is_not_fatal() {
        let settings = SkillSettings {
            show_utterances: true,
            ..Default::default()
        };
        let h = harness_with(settings, RecordingGui::failing(), RecordingMetrics::default());
        let outcome = h.fallback.handle(&addressed("play some jazz")).unwrap();

        assert_eq!(outcome, FallbackOutcome::Unknown);
        assert!(h.gui.pages().is_empty());
    }

    #[test]
    fn test_must_respond_absorbed_without_speaking() {
        let h = harness();
        let msg = Message::utterance("intent_failure", "who is Einstein")
            .with_context(MUST_RESPOND_KEY, true)
            .with_context("client", "mobile");
        let outcome = h.fallback.handle(&msg).unwrap();

        assert_eq!(outcome, FallbackOutcome::MustRespond);
        assert!(h.speaker.spoken().is_empty());
        assert_eq!(h.metrics.reports().len(), 1);
    }

    #[test]
    fn test_missing_utterance() {
        let h = harness();
        let msg = Message::new("intent_failure", json!({"lang": "en-us"}));
        assert!(matches!(
            h.fallback.handle(&msg),
            Err(FallbackError::MissingUtterance)
        ));
    }

    #[test]
    fn test_missing_vocab_propagates() {
        let h = harness();
        fs::remove_file(h._dir.path().join("why.is.voc")).unwrap();
        assert!(matches!(
            h.fallback.handle(&addressed("play some jazz")),
            Err(FallbackError::Vocab(_))
        ));
    }

    #[test]
    fn test_runtime_requirements() {
        let req = UnknownFallback::runtime_requirements();
        assert!(req.requires_internet && req.requires_network);
        assert!(!req.requires_gui);
        assert!(req.no_internet_fallback && req.no_network_fallback && req.no_gui_fallback);
    }

    proptest! {
        #[test]
        fn prop_short_utterances_never_speak(word in "[A-Za-z']{0,12}", pad in "[ \t]{0,3}") {
            let h = harness();
            let utterance = format!("{pad}{word}{pad}");
            let outcome = h.fallback.handle(&addressed(&utterance)).unwrap();

            prop_assert_eq!(outcome, FallbackOutcome::ShortUtterance);
            prop_assert!(outcome.handled());
            prop_assert!(h.speaker.spoken().is_empty());
        }
    }
}
