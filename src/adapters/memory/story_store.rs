//! In-memory story repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, StoryId};
use crate::domain::interview::Story;
use crate::ports::StoryRepository;

/// In-memory storage for story aggregates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    stories: Arc<RwLock<HashMap<StoryId, Story>>>,
}

impl InMemoryStoryRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored stories.
    pub async fn count(&self) -> usize {
        self.stories.read().await.len()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn save(&self, story: &Story) -> Result<(), DomainError> {
        self.stories.write().await.insert(story.id, story.clone());
        Ok(())
    }

    async fn update(&self, story: &Story) -> Result<(), DomainError> {
        let mut stories = self.stories.write().await;
        if !stories.contains_key(&story.id) {
            return Err(DomainError::new(
                ErrorCode::StoryNotFound,
                format!("Story {} not found", story.id),
            ));
        }
        stories.insert(story.id, story.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> Result<Option<Story>, DomainError> {
        Ok(self.stories.read().await.get(&id).cloned())
    }
}
