//! Vocabulary resource store

use crate::error::VocabError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default resource language
pub const DEFAULT_LANG: &str = "en-us";

/// Locates and reads `.voc` files under a skill resource root
#[derive(Debug, Clone)]
pub struct VocabStore {
    root: PathBuf,
    lang: String,
}

impl VocabStore {
    /// Create a store for `root` using the default language
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_lang(root, DEFAULT_LANG)
    }

    /// Create a store for `root` and a specific language
    pub fn with_lang(root: impl Into<PathBuf>, lang: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            lang: lang.into().to_lowercase(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Search paths for a resource, most specific first
    fn candidates(&self, name: &str) -> [PathBuf; 3] {
        let file = format!("{name}.voc");
        [
            self.root.join("vocab").join(&self.lang).join(&file),
            self.root.join("vocab").join(&file),
            self.root.join(&file),
        ]
    }

    /// Path of the first existing resource file for `name`
    pub fn find_resource(&self, name: &str) -> Result<PathBuf, VocabError> {
        let candidates = self.candidates(name);
        let searched = candidates.len();
        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| VocabError::NotFound {
                name: name.to_string(),
                searched,
            })
    }

    /// Trigger phrases of resource `name`, in file order.
    ///
    /// Reads the file on every call.
    pub fn read_lines(&self, name: &str) -> Result<Vec<String>, VocabError> {
        let path = self.find_resource(name)?;
        let content = fs::read_to_string(&path).map_err(|source| VocabError::Io {
            path: path.clone(),
            source,
        })?;
        let lines = parse_lines(&content);
        debug!("Loaded {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }
}

/// Trimmed, non-empty lines of a vocabulary file
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
