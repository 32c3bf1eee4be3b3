//! Message repository port.
//!
//! The transcript is append-only: messages are written once and never
//! mutated. Reads always return chronological order.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::transcript::StoredMessage;

/// Repository port for transcript persistence.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to a story's transcript.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn append(&self, message: &StoredMessage) -> Result<(), DomainError>;

    /// List all messages for a story in chronological order.
    async fn list_for_story(&self, story_id: StoryId) -> Result<Vec<StoredMessage>, DomainError>;

    /// List the most recent messages for a story, oldest first.
    ///
    /// Used to bound the context window sent to the model.
    async fn list_recent(
        &self,
        story_id: StoryId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, DomainError>;
}
