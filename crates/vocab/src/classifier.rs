//! Keyword-prefix classification

use crate::category::Category;
use crate::error::VocabError;
use crate::store::VocabStore;
use tracing::debug;

/// First vocabulary line that prefixed an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    pub category: Category,
    /// The matched vocabulary line
    pub prefix: String,
    /// Utterance text after the prefix, leading whitespace kept
    pub remaining: String,
}

/// Classify `utterance` against each category's vocabulary, in
/// [`Category::ALL`] order and file order within a category.
///
/// Matching is a literal, case-sensitive prefix test. Vocabulary for later
/// categories is not read once a match is found.
pub fn classify(store: &VocabStore, utterance: &str) -> Result<Option<PrefixMatch>, VocabError> {
    for category in Category::ALL {
        let lines = store.read_lines(category.name())?;
        if let Some((prefix, remaining)) = match_prefix(utterance, &lines) {
            debug!("Matched {:?} on prefix {:?}", category, prefix);
            return Ok(Some(PrefixMatch {
                category,
                prefix: prefix.to_string(),
                remaining: remaining.to_string(),
            }));
        }
    }
    Ok(None)
}

/// First line that `utterance` starts with, and the text after it
pub(crate) fn match_prefix<'u, 'l>(
    utterance: &'u str,
    lines: &'l [String],
) -> Option<(&'l str, &'u str)> {
    lines.iter().find_map(|line| {
        utterance
            .strip_prefix(line.as_str())
            .map(|rest| (line.as_str(), rest))
    })
}
