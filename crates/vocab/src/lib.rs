//! Vocabulary Resources
//!
//! Locates `.voc` resource files, parses their trigger phrases, and
//! classifies utterances by literal keyword prefix.

mod category;
mod classifier;
mod error;
mod store;

pub use category::Category;
pub use classifier::{classify, PrefixMatch};
pub use error::VocabError;
pub use store::{parse_lines, VocabStore};
