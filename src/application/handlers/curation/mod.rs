//! Curation use-case handlers.

mod curate_story;
mod list_snippets;
mod snippet_lifecycle;

pub use curate_story::{CurateStoryError, CurateStoryHandler, CurateStoryResult};
pub use list_snippets::{ListSnippetsHandler, SnippetListing};
pub use snippet_lifecycle::{SnippetLifecycleError, SnippetLifecycleHandler};
