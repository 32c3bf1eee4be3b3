//! Stored transcript messages.
//!
//! Messages are immutable once written; the core never edits a past
//! message. Each message optionally carries the phase it was collected
//! in, which is the preferred grouping signal for curation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, StoryId, Timestamp, ValidationError};
use crate::domain::interview::Phase;

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (invisible to the user).
    System,
    /// User input.
    User,
    /// AI assistant response.
    Assistant,
}

impl Role {
    /// Returns true if this is a user-visible role.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

/// An immutable message within a story transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: MessageId,
    pub story_id: StoryId,
    pub role: Role,
    pub content: String,
    /// The chapter this message was collected in, when known.
    pub phase: Option<Phase>,
    pub created_at: Timestamp,
}

impl StoredMessage {
    /// Creates a new message.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the content is empty
    pub fn new(
        story_id: StoryId,
        role: Role,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            id: MessageId::new(),
            story_id,
            role,
            content,
            phase: None,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a user message.
    pub fn user(story_id: StoryId, content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(story_id, Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(
        story_id: StoryId,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(story_id, Role::Assistant, content)
    }

    /// Tags the message with the chapter it was collected in.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        story_id: StoryId,
        role: Role,
        content: String,
        phase: Option<Phase>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            story_id,
            role,
            content,
            phase,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_has_no_phase_by_default() {
        let msg = StoredMessage::user(StoryId::new(), "Hello").unwrap();
        assert_eq!(msg.role, Role::User);
        assert!(msg.phase.is_none());
    }

    #[test]
    fn with_phase_tags_the_message() {
        let msg = StoredMessage::user(StoryId::new(), "I played soccer.")
            .unwrap()
            .with_phase(Phase::Childhood);
        assert_eq!(msg.phase, Some(Phase::Childhood));
    }

    #[test]
    fn empty_content_is_rejected() {
        let result = StoredMessage::user(StoryId::new(), "   ");
        assert!(matches!(
            result,
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn system_role_is_not_user_visible() {
        assert!(!Role::System.is_user_visible());
        assert!(Role::User.is_user_visible());
        assert!(Role::Assistant.is_user_visible());
    }
}
