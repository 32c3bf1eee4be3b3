//! Curation module - Snippet entity and model payload parsing.
//!
//! Snippets are the card-sized narrative extracts produced per chapter.
//! The parser turns the model's structured reply into validated drafts;
//! the entity owns the lock/archive/reorder lifecycle.

mod parser;
mod snippet;

pub use parser::{parse_snippet_payload, SnippetDraft};
pub use snippet::{Snippet, MAX_CONTENT_LEN, MAX_TITLE_LEN};
