//! In-memory message repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::transcript::StoredMessage;
use crate::ports::MessageRepository;

/// In-memory append-only transcript storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<Vec<StoredMessage>>>,
}

impl InMemoryMessageRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored messages.
    pub async fn count(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: &StoredMessage) -> Result<(), DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn list_for_story(&self, story_id: StoryId) -> Result<Vec<StoredMessage>, DomainError> {
        let messages = self.messages.read().await;
        let mut story_messages: Vec<_> = messages
            .iter()
            .filter(|m| m.story_id == story_id)
            .cloned()
            .collect();
        story_messages.sort_by_key(|m| m.created_at);
        Ok(story_messages)
    }

    async fn list_recent(
        &self,
        story_id: StoryId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, DomainError> {
        let mut story_messages = self.list_for_story(story_id).await?;
        if story_messages.len() > limit {
            story_messages.drain(..story_messages.len() - limit);
        }
        Ok(story_messages)
    }
}
