//! Story repository port.
//!
//! Defines the contract for persisting and retrieving Story aggregates.
//! The core is stateless: every operation loads the story, mutates it,
//! and saves it back through this port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::interview::Story;

/// Repository port for Story aggregate persistence.
///
/// Implementations must serialize concurrent writes to the same story
/// (the delete-then-insert curation sequence and phase advances are not
/// atomic by construction).
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Save a new story.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, story: &Story) -> Result<(), DomainError>;

    /// Update an existing story.
    ///
    /// # Errors
    ///
    /// - `StoryNotFound` if the story doesn't exist
    /// - `StorageError` on persistence failure
    async fn update(&self, story: &Story) -> Result<(), DomainError>;

    /// Find a story by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: StoryId) -> Result<Option<Story>, DomainError>;
}
