//! Unknown Fallback Command-Line Host
//!
//! Wires the fallback to log-only speech/GUI services, a channel bus, and
//! the Prometheus metrics recorder, then feeds it utterances line by line.

mod settings;

pub use settings::{AppConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};

use fallback::{FallbackServices, UnknownFallback};
use skill_host::address::SHOULD_RESPOND_KEY;
use skill_host::{
    ChannelBus, ContextAddressPolicy, CounterMetricReporter, LogGui, LogSpeaker, Message,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vocab::VocabStore;

/// Message type used for stdin utterances
pub const INTENT_FAILURE_MESSAGE: &str = "intent_failure";

/// Initialize logging to stderr at `level`, falling back to INFO
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let max_level = Level::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level {:?}, using info", level);
        Level::INFO
    });

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Build the fallback from configuration and a bus
pub fn build_fallback(config: &AppConfig, bus: ChannelBus) -> UnknownFallback {
    let services = FallbackServices {
        bus: Arc::new(bus),
        speaker: Arc::new(LogSpeaker),
        gui: Arc::new(LogGui),
        metrics: Arc::new(CounterMetricReporter),
        policy: Arc::new(ContextAddressPolicy::new(&config.assistant_names)),
    };
    let vocab = VocabStore::with_lang(config.resource_root(), config.lang.clone());

    info!(
        "Unknown fallback ready (priority {}, requirements {:?})",
        UnknownFallback::PRIORITY,
        UnknownFallback::runtime_requirements()
    );
    UnknownFallback::new(services, vocab, config.skill.clone(), config.core.clone())
}

/// Turn an input line into a message.
///
/// Lines starting with `{` are parsed as full JSON messages; anything else
/// is a plain utterance, marked addressed when `assume_addressed` is set.
/// Returns `None` for blank lines.
pub fn parse_input(line: &str, assume_addressed: bool) -> Option<Message> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.starts_with('{') {
        match serde_json::from_str::<Message>(line) {
            Ok(message) => return Some(message),
            Err(e) => warn!("Treating unparseable JSON as utterance: {}", e),
        }
    }

    let message = Message::utterance(INTENT_FAILURE_MESSAGE, line);
    Some(if assume_addressed {
        message.with_context(SHOULD_RESPOND_KEY, true)
    } else {
        message
    })
}
