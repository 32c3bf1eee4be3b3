//! Snippet repository port.
//!
//! Covers persistence plus the lifecycle queries curation needs:
//! active/archived reads, locked-snippet capture before regeneration,
//! bulk soft-delete of unlocked snippets, and physical purge.

use async_trait::async_trait;

use crate::domain::curation::Snippet;
use crate::domain::foundation::{DomainError, SnippetId, StoryId};

/// Repository port for snippet persistence and lifecycle operations.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a new snippet.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn insert(&self, snippet: &Snippet) -> Result<(), DomainError>;

    /// Update an existing snippet.
    ///
    /// # Errors
    ///
    /// - `SnippetNotFound` if the snippet doesn't exist
    async fn update(&self, snippet: &Snippet) -> Result<(), DomainError>;

    /// Find a snippet by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, DomainError>;

    /// List a story's snippets ordered by display order, then creation
    /// time. Archived snippets are excluded unless `include_archived`.
    async fn list_for_story(
        &self,
        story_id: StoryId,
        include_archived: bool,
    ) -> Result<Vec<Snippet>, DomainError>;

    /// List a story's archived snippets, most recent first.
    async fn list_archived(&self, story_id: StoryId) -> Result<Vec<Snippet>, DomainError>;

    /// List a story's locked, active snippets in creation order.
    ///
    /// Captured before regeneration so the extraction prompt can name
    /// content the model must not duplicate.
    async fn list_locked_active(&self, story_id: StoryId) -> Result<Vec<Snippet>, DomainError>;

    /// Soft-delete all unlocked, active snippets for a story.
    ///
    /// Returns the number of snippets archived. Locked snippets are
    /// untouched.
    async fn archive_unlocked(&self, story_id: StoryId) -> Result<usize, DomainError>;

    /// Permanently delete a snippet.
    ///
    /// Returns true if a snippet was removed, false if it didn't exist.
    async fn remove(&self, id: SnippetId) -> Result<bool, DomainError>;
}
