//! AdvancePhaseHandler - Explicit chapter navigation.
//!
//! Question phases advance only through this handler (a "next chapter"
//! action), never through message-content heuristics. A target phase
//! turns the advance into a jump for chapter navigation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::interview::Phase;
use crate::ports::StoryRepository;

/// Command to advance or jump the interview phase.
#[derive(Debug, Clone)]
pub struct AdvancePhaseCommand {
    pub story_id: StoryId,
    /// When set, jump directly to this phase instead of stepping
    /// forward.
    pub target: Option<Phase>,
}

/// Result of a phase transition.
#[derive(Debug, Clone)]
pub struct AdvancePhaseResult {
    pub previous_phase: Phase,
    pub current_phase: Phase,
    pub phase_index: usize,
    pub available_phases: Vec<Phase>,
    pub is_complete: bool,
}

/// Error type for phase transitions.
#[derive(Debug, thiserror::Error)]
pub enum AdvancePhaseError {
    #[error("Story not found: {0}")]
    NotFound(StoryId),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Handler for explicit phase transitions.
pub struct AdvancePhaseHandler {
    stories: Arc<dyn StoryRepository>,
}

impl AdvancePhaseHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    pub async fn handle(
        &self,
        cmd: AdvancePhaseCommand,
    ) -> Result<AdvancePhaseResult, AdvancePhaseError> {
        let mut story = self
            .stories
            .find_by_id(cmd.story_id)
            .await?
            .ok_or(AdvancePhaseError::NotFound(cmd.story_id))?;

        let previous_phase = story.current_phase;

        match cmd.target {
            Some(target) => story.jump_to_phase(target)?,
            None => story.advance_phase()?,
        };

        self.stories.update(&story).await?;

        Ok(AdvancePhaseResult {
            previous_phase,
            current_phase: story.current_phase,
            phase_index: story.phase_index(),
            available_phases: story.available_phases(),
            is_complete: story.is_complete(),
        })
    }
}
