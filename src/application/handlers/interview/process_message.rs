//! ProcessMessageHandler - One interview turn.
//!
//! Persists the user message, decides whether the greeting should
//! advance, asks the model cascade for a reply using the current
//! phase's instruction, and persists the assistant reply. Question
//! phases never advance from message content; that is an explicit
//! caller action handled by `AdvancePhaseHandler`.

use std::sync::Arc;

use crate::adapters::ai::{CascadeClient, CascadeError};
use crate::domain::foundation::{DomainError, StoryId, ValidationError};
use crate::domain::interview::{catalog, Phase};
use crate::domain::transcript::{Role, StoredMessage};
use crate::ports::{ChatMessage, ChatRole, MessageRepository, StoryRepository};

/// How many recent messages are sent as model context.
const CONTEXT_WINDOW: usize = 20;

/// Command to process one user message.
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub story_id: StoryId,
    pub text: String,
}

/// Result of one interview turn.
#[derive(Debug, Clone)]
pub struct ProcessMessageResult {
    /// The assistant's reply.
    pub reply: String,
    /// The phase the reply was generated for.
    pub phase: Phase,
    /// Model that produced the reply.
    pub model: String,
    /// Cascade attempts used.
    pub attempts: u32,
}

/// Error type for processing a message.
#[derive(Debug, thiserror::Error)]
pub enum ProcessMessageError {
    #[error("Story not found: {0}")]
    NotFound(StoryId),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Generation failed: {0}")]
    Generation(#[from] CascadeError),
}

/// Handler for one interview turn.
pub struct ProcessMessageHandler {
    stories: Arc<dyn StoryRepository>,
    messages: Arc<dyn MessageRepository>,
    cascade: CascadeClient,
}

impl ProcessMessageHandler {
    pub fn new(
        stories: Arc<dyn StoryRepository>,
        messages: Arc<dyn MessageRepository>,
        cascade: CascadeClient,
    ) -> Self {
        Self {
            stories,
            messages,
            cascade,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessMessageCommand,
    ) -> Result<ProcessMessageResult, ProcessMessageError> {
        let mut story = self
            .stories
            .find_by_id(cmd.story_id)
            .await?
            .ok_or(ProcessMessageError::NotFound(cmd.story_id))?;

        let user_message = StoredMessage::user(story.id, cmd.text.clone())?
            .with_phase(story.current_phase);
        self.messages.append(&user_message).await?;

        // The greeting advances on an affirmative readiness reply.
        if story.should_advance_on(&cmd.text) {
            story.advance_phase()?;
            self.stories.update(&story).await?;
        }

        let history = self.build_history(story.id).await?;
        let instruction = catalog::prompt(story.current_phase);

        let generation = self.cascade.generate(history, instruction).await?;

        let assistant_message = StoredMessage::assistant(story.id, generation.content.clone())?
            .with_phase(story.current_phase);
        self.messages.append(&assistant_message).await?;

        Ok(ProcessMessageResult {
            reply: generation.content,
            phase: story.current_phase,
            model: generation.model,
            attempts: generation.attempts,
        })
    }

    /// Converts the recent transcript into provider messages.
    async fn build_history(&self, story_id: StoryId) -> Result<Vec<ChatMessage>, DomainError> {
        let recent = self.messages.list_recent(story_id, CONTEXT_WINDOW).await?;

        Ok(recent
            .into_iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::System => ChatRole::System,
                    Role::User => ChatRole::User,
                    Role::Assistant => ChatRole::Assistant,
                };
                ChatMessage::new(role, msg.content)
            })
            .collect())
    }
}
