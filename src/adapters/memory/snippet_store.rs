//! In-memory snippet repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::curation::Snippet;
use crate::domain::foundation::{DomainError, ErrorCode, SnippetId, StoryId};
use crate::ports::SnippetRepository;

/// In-memory snippet storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnippetRepository {
    snippets: Arc<RwLock<HashMap<SnippetId, Snippet>>>,
}

impl InMemorySnippetRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored snippets.
    pub async fn count(&self) -> usize {
        self.snippets.read().await.len()
    }
}

#[async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn insert(&self, snippet: &Snippet) -> Result<(), DomainError> {
        self.snippets
            .write()
            .await
            .insert(snippet.id, snippet.clone());
        Ok(())
    }

    async fn update(&self, snippet: &Snippet) -> Result<(), DomainError> {
        let mut snippets = self.snippets.write().await;
        if !snippets.contains_key(&snippet.id) {
            return Err(DomainError::new(
                ErrorCode::SnippetNotFound,
                format!("Snippet {} not found", snippet.id),
            ));
        }
        snippets.insert(snippet.id, snippet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, DomainError> {
        Ok(self.snippets.read().await.get(&id).cloned())
    }

    async fn list_for_story(
        &self,
        story_id: StoryId,
        include_archived: bool,
    ) -> Result<Vec<Snippet>, DomainError> {
        let snippets = self.snippets.read().await;
        let mut listed: Vec<_> = snippets
            .values()
            .filter(|s| s.story_id == story_id && (include_archived || s.is_active))
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(listed)
    }

    async fn list_archived(&self, story_id: StoryId) -> Result<Vec<Snippet>, DomainError> {
        let snippets = self.snippets.read().await;
        let mut listed: Vec<_> = snippets
            .values()
            .filter(|s| s.story_id == story_id && !s.is_active)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn list_locked_active(&self, story_id: StoryId) -> Result<Vec<Snippet>, DomainError> {
        let snippets = self.snippets.read().await;
        let mut listed: Vec<_> = snippets
            .values()
            .filter(|s| s.story_id == story_id && s.is_locked && s.is_active)
            .cloned()
            .collect();
        listed.sort_by_key(|s| s.created_at);
        Ok(listed)
    }

    async fn archive_unlocked(&self, story_id: StoryId) -> Result<usize, DomainError> {
        let mut snippets = self.snippets.write().await;
        let mut archived = 0;
        for snippet in snippets.values_mut() {
            if snippet.story_id == story_id && !snippet.is_locked && snippet.is_active {
                snippet.archive();
                archived += 1;
            }
        }
        Ok(archived)
    }

    async fn remove(&self, id: SnippetId) -> Result<bool, DomainError> {
        Ok(self.snippets.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[tokio::test]
    async fn insert_and_find_round_trips() {
        let repo = InMemorySnippetRepository::new();
        let s = snippet(StoryId::new(), "First", 0);

        repo.insert(&s).await.unwrap();
        let loaded = repo.find_by_id(s.id).await.unwrap().unwrap();
        assert_eq!(loaded, s);
    }

    #[tokio::test]
    async fn list_orders_by_display_order() {
        let repo = InMemorySnippetRepository::new();
        let story_id = StoryId::new();

        repo.insert(&snippet(story_id, "third", 2)).await.unwrap();
        repo.insert(&snippet(story_id, "first", 0)).await.unwrap();
        repo.insert(&snippet(story_id, "second", 1)).await.unwrap();

        let listed = repo.list_for_story(story_id, false).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn archived_snippets_are_hidden_from_default_reads() {
        let repo = InMemorySnippetRepository::new();
        let story_id = StoryId::new();
        let mut s = snippet(story_id, "gone", 0);

        repo.insert(&s).await.unwrap();
        s.archive();
        repo.update(&s).await.unwrap();

        assert!(repo.list_for_story(story_id, false).await.unwrap().is_empty());
        assert_eq!(repo.list_for_story(story_id, true).await.unwrap().len(), 1);
        assert_eq!(repo.list_archived(story_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn archive_unlocked_spares_locked_snippets() {
        let repo = InMemorySnippetRepository::new();
        let story_id = StoryId::new();

        let mut locked = snippet(story_id, "locked", 0);
        locked.toggle_lock();
        repo.insert(&locked).await.unwrap();
        repo.insert(&snippet(story_id, "unlocked", 1)).await.unwrap();

        let archived = repo.archive_unlocked(story_id).await.unwrap();
        assert_eq!(archived, 1);

        let remaining = repo.list_for_story(story_id, false).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "locked");
    }

    #[tokio::test]
    async fn list_locked_active_excludes_archived_and_unlocked() {
        let repo = InMemorySnippetRepository::new();
        let story_id = StoryId::new();

        let mut locked = snippet(story_id, "locked", 0);
        locked.toggle_lock();
        repo.insert(&locked).await.unwrap();

        let mut locked_archived = snippet(story_id, "locked archived", 1);
        locked_archived.toggle_lock();
        locked_archived.archive();
        repo.insert(&locked_archived).await.unwrap();

        repo.insert(&snippet(story_id, "unlocked", 2)).await.unwrap();

        let locked_list = repo.list_locked_active(story_id).await.unwrap();
        assert_eq!(locked_list.len(), 1);
        assert_eq!(locked_list[0].title, "locked");
    }

    #[tokio::test]
    async fn remove_deletes_permanently() {
        let repo = InMemorySnippetRepository::new();
        let s = snippet(StoryId::new(), "gone", 0);
        repo.insert(&s).await.unwrap();

        assert!(repo.remove(s.id).await.unwrap());
        assert!(!repo.remove(s.id).await.unwrap());
        assert!(repo.find_by_id(s.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_snippet_fails() {
        let repo = InMemorySnippetRepository::new();
        let s = snippet(StoryId::new(), "ghost", 0);
        let err = repo.update(&s).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SnippetNotFound);
    }
}
