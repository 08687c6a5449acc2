//! Addressing heuristics

use crate::message::Message;
use serde_json::Value;

/// Context key set by the host when the request must be answered
pub const MUST_RESPOND_KEY: &str = "neon_must_respond";
/// Context key set by the host when the request was addressed to the assistant
pub const SHOULD_RESPOND_KEY: &str = "neon_should_respond";

/// Decides whether a request was meant for the assistant
pub trait AddressPolicy: Send + Sync {
    /// The request names the assistant or arrived on a direct channel
    fn is_addressed(&self, message: &Message) -> bool;

    /// The request must be answered regardless of addressing
    fn must_respond(&self, message: &Message) -> bool;

    /// The request came from a mobile client
    fn request_from_mobile(&self, message: &Message) -> bool;
}

/// Address policy driven by message context and assistant names
#[derive(Debug, Clone)]
pub struct ContextAddressPolicy {
    /// Normalized assistant names, each padded with spaces for word matching
    names: Vec<String>,
}

impl ContextAddressPolicy {
    /// Create a policy that recognizes the given assistant names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.trim().is_empty())
            .collect();
        Self { names }
    }

    fn mentions_name(&self, utterance: &str) -> bool {
        let text = normalize(utterance);
        self.names.iter().any(|name| text.contains(name.as_str()))
    }
}

impl Default for ContextAddressPolicy {
    fn default() -> Self {
        Self::new(["neon"])
    }
}

impl AddressPolicy for ContextAddressPolicy {
    fn is_addressed(&self, message: &Message) -> bool {
        if message.context_flag(SHOULD_RESPOND_KEY) {
            return true;
        }
        message
            .utterance_text()
            .map(|u| self.mentions_name(u))
            .unwrap_or(false)
    }

    fn must_respond(&self, message: &Message) -> bool {
        message.context_flag(MUST_RESPOND_KEY)
    }

    fn request_from_mobile(&self, message: &Message) -> bool {
        message.context_flag("mobile")
            || matches!(message.context.get("client"), Some(Value::String(c)) if c == "mobile")
    }
}

/// Lowercase words stripped of punctuation, joined and padded with single spaces
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();
    format!(" {} ", words.join(" "))
}
