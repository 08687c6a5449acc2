//! Unknown-Intent Fallback
//!
//! Last-resort handler for utterances no other skill matched. Absorbs
//! requests not meant for the assistant, ignores likely accidental
//! activations, and otherwise answers with a category dialog or `unknown`.

mod handler;

pub use handler::{FallbackOutcome, FallbackServices, UnknownFallback};

use std::path::PathBuf;
use thiserror::Error;

/// Fallback error types
#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("Message has no utterance")]
    MissingUtterance,

    #[error("Vocabulary error: {0}")]
    Vocab(#[from] vocab::VocabError),

    #[error("Host error: {0}")]
    Host(#[from] skill_host::HostError),
}

/// Resource root shipped with this crate (`vocab/<lang>/*.voc`)
pub fn resource_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("res")
}
