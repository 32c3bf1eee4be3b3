//! SnippetLifecycleHandler - Lock, archive, restore, purge, reorder.

use std::sync::Arc;

use crate::domain::curation::Snippet;
use crate::domain::foundation::{DomainError, SnippetId, StoryId};
use crate::ports::SnippetRepository;

/// Error type for snippet lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum SnippetLifecycleError {
    #[error("Snippet not found: {0}")]
    NotFound(SnippetId),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Handler for snippet lifecycle operations.
pub struct SnippetLifecycleHandler {
    snippets: Arc<dyn SnippetRepository>,
}

impl SnippetLifecycleHandler {
    pub fn new(snippets: Arc<dyn SnippetRepository>) -> Self {
        Self { snippets }
    }

    /// Toggles the lock flag, returning the updated snippet.
    pub async fn toggle_lock(&self, id: SnippetId) -> Result<Snippet, SnippetLifecycleError> {
        self.mutate(id, Snippet::toggle_lock).await
    }

    /// Soft-deletes a snippet, returning the updated snippet.
    pub async fn soft_delete(&self, id: SnippetId) -> Result<Snippet, SnippetLifecycleError> {
        self.mutate(id, Snippet::archive).await
    }

    /// Restores an archived snippet, returning the updated snippet.
    pub async fn restore(&self, id: SnippetId) -> Result<Snippet, SnippetLifecycleError> {
        self.mutate(id, Snippet::restore).await
    }

    /// Permanently deletes a snippet.
    ///
    /// Returns true if a snippet was removed.
    pub async fn permanently_delete(&self, id: SnippetId) -> Result<bool, SnippetLifecycleError> {
        Ok(self.snippets.remove(id).await?)
    }

    /// Rewrites display order to match the given id sequence.
    ///
    /// Ids not belonging to the story are ignored. Returns the number
    /// of snippets repositioned.
    pub async fn reorder(
        &self,
        story_id: StoryId,
        ordered_ids: &[SnippetId],
    ) -> Result<usize, SnippetLifecycleError> {
        let owned = self.snippets.list_for_story(story_id, true).await?;

        let mut repositioned = 0;
        for (position, id) in ordered_ids.iter().enumerate() {
            let Some(snippet) = owned.iter().find(|s| s.id == *id) else {
                continue;
            };

            let mut snippet = snippet.clone();
            snippet.set_display_order(position as u32);
            self.snippets.update(&snippet).await?;
            repositioned += 1;
        }

        Ok(repositioned)
    }

    async fn mutate(
        &self,
        id: SnippetId,
        op: impl FnOnce(&mut Snippet),
    ) -> Result<Snippet, SnippetLifecycleError> {
        let mut snippet = self
            .snippets
            .find_by_id(id)
            .await?
            .ok_or(SnippetLifecycleError::NotFound(id))?;

        op(&mut snippet);
        self.snippets.update(&snippet).await?;
        Ok(snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySnippetRepository;
    use crate::domain::curation::SnippetDraft;
    use crate::domain::interview::Phase;

    fn snippet(story_id: StoryId, title: &str, order: u32) -> Snippet {
        Snippet::from_draft(
            story_id,
            SnippetDraft {
                title: title.to_string(),
                content: "Content".to_string(),
                theme: "growth".to_string(),
            },
            Phase::Childhood,
            order,
        )
    }

    async fn handler_with(
        snippets: &[Snippet],
    ) -> (Arc<InMemorySnippetRepository>, SnippetLifecycleHandler) {
        let repo = Arc::new(InMemorySnippetRepository::new());
        for s in snippets {
            repo.insert(s).await.unwrap();
        }
        (repo.clone(), SnippetLifecycleHandler::new(repo))
    }

    #[tokio::test]
    async fn toggle_lock_flips_and_persists() {
        let s = snippet(StoryId::new(), "Title", 0);
        let (repo, handler) = handler_with(&[s.clone()]).await;

        let updated = handler.toggle_lock(s.id).await.unwrap();
        assert!(updated.is_locked);

        let stored = repo.find_by_id(s.id).await.unwrap().unwrap();
        assert!(stored.is_locked);

        let updated = handler.toggle_lock(s.id).await.unwrap();
        assert!(!updated.is_locked);
    }

    #[tokio::test]
    async fn soft_delete_then_restore_round_trips() {
        let s = snippet(StoryId::new(), "Title", 0);
        let (repo, handler) = handler_with(&[s.clone()]).await;

        let archived = handler.soft_delete(s.id).await.unwrap();
        assert!(!archived.is_active);

        let restored = handler.restore(s.id).await.unwrap();
        assert!(restored.is_active);

        let stored = repo.find_by_id(s.id).await.unwrap().unwrap();
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn permanently_delete_removes_the_record() {
        let s = snippet(StoryId::new(), "Title", 0);
        let (repo, handler) = handler_with(&[s.clone()]).await;

        assert!(handler.permanently_delete(s.id).await.unwrap());
        assert!(repo.find_by_id(s.id).await.unwrap().is_none());
        assert!(!handler.permanently_delete(s.id).await.unwrap());
    }

    #[tokio::test]
    async fn reorder_rewrites_display_order_to_match_sequence() {
        let story_id = StoryId::new();
        let a = snippet(story_id, "a", 0);
        let b = snippet(story_id, "b", 1);
        let c = snippet(story_id, "c", 2);
        let (repo, handler) = handler_with(&[a.clone(), b.clone(), c.clone()]).await;

        let repositioned = handler
            .reorder(story_id, &[c.id, a.id, b.id])
            .await
            .unwrap();
        assert_eq!(repositioned, 3);

        let listed = repo.list_for_story(story_id, false).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn reorder_ignores_foreign_ids() {
        let story_id = StoryId::new();
        let a = snippet(story_id, "a", 0);
        let foreign = snippet(StoryId::new(), "foreign", 0);
        let (repo, handler) = handler_with(&[a.clone(), foreign.clone()]).await;

        let repositioned = handler
            .reorder(story_id, &[foreign.id, a.id])
            .await
            .unwrap();
        assert_eq!(repositioned, 1);

        // The foreign snippet keeps its own story's ordering.
        let untouched = repo.find_by_id(foreign.id).await.unwrap().unwrap();
        assert_eq!(untouched.display_order, 0);

        let moved = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(moved.display_order, 1);
    }

    #[tokio::test]
    async fn operations_on_missing_snippets_fail() {
        let (_, handler) = handler_with(&[]).await;
        let id = SnippetId::new();

        assert!(matches!(
            handler.toggle_lock(id).await,
            Err(SnippetLifecycleError::NotFound(_))
        ));
        assert!(matches!(
            handler.soft_delete(id).await,
            Err(SnippetLifecycleError::NotFound(_))
        ));
        assert!(matches!(
            handler.restore(id).await,
            Err(SnippetLifecycleError::NotFound(_))
        ));
    }
}
