//! Vocabulary Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while locating or reading vocabulary resources
#[derive(Debug, Error)]
pub enum VocabError {
    /// No resource file under any search path
    #[error("Vocabulary resource not found: {name}.voc (searched {searched} paths)")]
    NotFound { name: String, searched: usize },

    /// Resource file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
