//! SelectAgeHandler - Age selection and the move into the first chapter.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::interview::{AgeRange, Phase};
use crate::ports::StoryRepository;

/// Command to select the user's age range.
#[derive(Debug, Clone)]
pub struct SelectAgeCommand {
    pub story_id: StoryId,
    /// Raw selection input: "1".."5" or a wire value like "31_45".
    pub selection: String,
}

/// Result of an age selection.
#[derive(Debug, Clone)]
pub struct SelectAgeResult {
    pub age_range: AgeRange,
    pub current_phase: Phase,
    pub available_phases: Vec<Phase>,
}

/// Error type for age selection.
#[derive(Debug, thiserror::Error)]
pub enum SelectAgeError {
    #[error("Story not found: {0}")]
    NotFound(StoryId),

    #[error("Invalid age selection: {0:?}")]
    InvalidSelection(String),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Handler for age selection.
pub struct SelectAgeHandler {
    stories: Arc<dyn StoryRepository>,
}

impl SelectAgeHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    pub async fn handle(&self, cmd: SelectAgeCommand) -> Result<SelectAgeResult, SelectAgeError> {
        let age_range = AgeRange::parse_selection(&cmd.selection)
            .ok_or_else(|| SelectAgeError::InvalidSelection(cmd.selection.clone()))?;

        let mut story = self
            .stories
            .find_by_id(cmd.story_id)
            .await?
            .ok_or(SelectAgeError::NotFound(cmd.story_id))?;

        story.set_age_range(age_range)?;

        // A valid selection is what moves age selection into the first
        // chapter.
        if story.current_phase == Phase::AgeSelection {
            story.advance_phase()?;
        }

        self.stories.update(&story).await?;

        Ok(SelectAgeResult {
            age_range,
            current_phase: story.current_phase,
            available_phases: story.available_phases(),
        })
    }
}
