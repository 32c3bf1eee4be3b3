//! ListSnippetsHandler - Snippet reads.
//!
//! Curated snippets are persisted, so reads never trigger
//! regeneration; the `cached` flag tells callers whether anything
//! exists yet.

use std::sync::Arc;

use crate::domain::curation::Snippet;
use crate::domain::foundation::{DomainError, StoryId};
use crate::ports::SnippetRepository;

/// A snippet listing for one story.
#[derive(Debug, Clone)]
pub struct SnippetListing {
    pub snippets: Vec<Snippet>,
    pub count: usize,
    /// True when stored snippets exist (no regeneration needed).
    pub cached: bool,
}

/// Handler for snippet reads.
pub struct ListSnippetsHandler {
    snippets: Arc<dyn SnippetRepository>,
}

impl ListSnippetsHandler {
    pub fn new(snippets: Arc<dyn SnippetRepository>) -> Self {
        Self { snippets }
    }

    /// Lists a story's snippets in display order.
    ///
    /// Archived snippets are excluded unless `include_archived`.
    pub async fn handle(
        &self,
        story_id: StoryId,
        include_archived: bool,
    ) -> Result<SnippetListing, DomainError> {
        let snippets = self
            .snippets
            .list_for_story(story_id, include_archived)
            .await?;

        Ok(SnippetListing {
            count: snippets.len(),
            cached: !snippets.is_empty(),
            snippets,
        })
    }

    /// Lists a story's archived snippets, most recent first.
    pub async fn archived(&self, story_id: StoryId) -> Result<SnippetListing, DomainError> {
        let snippets = self.snippets.list_archived(story_id).await?;

        Ok(SnippetListing {
            count: snippets.len(),
            cached: !snippets.is_empty(),
            snippets,
        })
    }
}
