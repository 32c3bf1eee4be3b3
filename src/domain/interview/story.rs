//! Story aggregate - one life-story interview and its phase state.
//!
//! The aggregate owns the current phase, the age selection, and every
//! transition rule. It holds no process-wide state: callers load it,
//! mutate it through these operations, and persist it again each turn.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StoryId, Timestamp};

use super::catalog;
use super::{AgeRange, Phase};

/// Story lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

/// A life-story interview.
///
/// # Invariants
///
/// - `current_phase` is in `available_phases()` once the age is set
/// - the phase index never moves backward except through `jump_to_phase`
/// - `age_range`, once set, is immutable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub current_phase: Phase,
    pub age_range: Option<AgeRange>,
    pub status: StoryStatus,
    pub created_at: Timestamp,
}

impl Story {
    /// Creates a new story at the greeting phase.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: StoryId::new(),
            title: if title.is_empty() {
                "Untitled Story".to_string()
            } else {
                title
            },
            current_phase: Phase::Greeting,
            age_range: None,
            status: StoryStatus::Draft,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a story from persistence.
    pub fn reconstitute(
        id: StoryId,
        title: String,
        current_phase: Phase,
        age_range: Option<AgeRange>,
        status: StoryStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            current_phase,
            age_range,
            status,
            created_at,
        }
    }

    /// The chapters available to this story, given its age selection.
    pub fn available_phases(&self) -> Vec<Phase> {
        catalog::phases_for_age(self.age_range)
    }

    /// Index of the current phase within the available list.
    pub fn phase_index(&self) -> usize {
        self.available_phases()
            .iter()
            .position(|p| *p == self.current_phase)
            .unwrap_or(0)
    }

    /// True once the interview has reached synthesis.
    pub fn is_complete(&self) -> bool {
        self.current_phase == Phase::Synthesis
    }

    /// Interview progress as a percentage of the available chapters.
    pub fn progress_percentage(&self) -> f64 {
        let phases = self.available_phases();
        if phases.len() <= 1 {
            return 0.0;
        }
        (self.phase_index() as f64 / (phases.len() - 1) as f64) * 100.0
    }

    /// Sets the user's age range, fixing the chapter list.
    ///
    /// # Errors
    ///
    /// - `AgeAlreadySet` if an age range was already selected
    pub fn set_age_range(&mut self, age_range: AgeRange) -> Result<(), DomainError> {
        if self.age_range.is_some() {
            return Err(DomainError::new(
                ErrorCode::AgeAlreadySet,
                "Age range already set for this story",
            ));
        }
        self.age_range = Some(age_range);
        Ok(())
    }

    /// Checks whether the story can transition to the target phase.
    ///
    /// Rejects targets outside the available set, backward moves, and
    /// anything past age selection while the age is unset.
    pub fn can_advance_to(&self, target: Phase) -> bool {
        let available = self.available_phases();

        let Some(target_idx) = available.iter().position(|p| *p == target) else {
            return false;
        };

        if target_idx < self.phase_index() {
            return false;
        }

        if target_idx > 1 && self.age_range.is_none() {
            return false;
        }

        true
    }

    /// Advances exactly one chapter forward.
    ///
    /// # Errors
    ///
    /// - `InterviewComplete` if already at the final phase
    /// - `InvalidPhaseTransition` if the next phase is not reachable
    pub fn advance_phase(&mut self) -> Result<Phase, DomainError> {
        let phases = self.available_phases();
        let current_idx = self.phase_index();

        if current_idx >= phases.len() - 1 {
            return Err(DomainError::new(
                ErrorCode::InterviewComplete,
                "Already at final phase",
            ));
        }

        let next_phase = phases[current_idx + 1];

        if !self.can_advance_to(next_phase) {
            return Err(DomainError::new(
                ErrorCode::InvalidPhaseTransition,
                format!("Cannot advance to {}", next_phase),
            )
            .with_detail("target", next_phase.wire_name()));
        }

        self.current_phase = next_phase;

        if self.status == StoryStatus::Draft && current_idx > 0 {
            self.status = StoryStatus::InProgress;
        }

        if next_phase == Phase::Synthesis {
            self.status = StoryStatus::Completed;
        }

        Ok(self.current_phase)
    }

    /// Repositions to a specific phase for chapter navigation.
    ///
    /// Bypasses ordering checks; the target only has to exist in the
    /// available set.
    ///
    /// # Errors
    ///
    /// - `InvalidPhaseTransition` if the target is not available
    pub fn jump_to_phase(&mut self, target: Phase) -> Result<Phase, DomainError> {
        if !self.available_phases().contains(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidPhaseTransition,
                format!("Phase {} not available for this story", target),
            )
            .with_detail("target", target.wire_name()));
        }

        self.current_phase = target;
        Ok(self.current_phase)
    }

    /// Whether a free-text user message should advance the phase.
    ///
    /// Only the greeting advances on message content (an affirmative
    /// readiness reply). Question phases advance on an explicit caller
    /// action, never on content heuristics.
    pub fn should_advance_on(&self, user_message: &str) -> bool {
        match self.current_phase {
            Phase::Greeting => catalog::greeting_should_advance(user_message),
            _ => false,
        }
    }

    /// Marks the story as completed.
    pub fn complete(&mut self) {
        self.status = StoryStatus::Completed;
    }

    /// Archives the story.
    pub fn archive(&mut self) {
        self.status = StoryStatus::Archived;
    }
}
