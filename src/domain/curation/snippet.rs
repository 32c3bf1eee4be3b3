//! Snippet entity - a card-sized narrative extract tied to one chapter.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SnippetId, StoryId, Timestamp};
use crate::domain::interview::Phase;

use super::SnippetDraft;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum content length in characters.
pub const MAX_CONTENT_LEN: usize = 300;

/// A short narrative extract suitable for printing on a game card.
///
/// # Invariants
///
/// - `title` is at most 200 characters, `content` at most 300
/// - locked snippets survive regeneration untouched
/// - archived snippets (`is_active == false`) are excluded from normal
///   reads but remain restorable; only an explicit purge removes them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub story_id: StoryId,
    pub title: String,
    pub content: String,
    pub theme: String,
    pub phase: Phase,
    pub is_locked: bool,
    pub is_active: bool,
    pub display_order: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Snippet {
    /// Creates a snippet from a validated draft.
    ///
    /// The phase is stamped by the caller from the chapter being
    /// processed; it is never taken from model output.
    pub fn from_draft(
        story_id: StoryId,
        draft: SnippetDraft,
        phase: Phase,
        display_order: u32,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: SnippetId::new(),
            story_id,
            title: draft.title,
            content: draft.content,
            theme: draft.theme,
            phase,
            is_locked: false,
            is_active: true,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Toggles the lock flag.
    pub fn toggle_lock(&mut self) {
        self.is_locked = !self.is_locked;
        self.updated_at = Timestamp::now();
    }

    /// Soft-deletes the snippet.
    pub fn archive(&mut self) {
        self.is_active = false;
        self.updated_at = Timestamp::now();
    }

    /// Restores an archived snippet.
    pub fn restore(&mut self) {
        self.is_active = true;
        self.updated_at = Timestamp::now();
    }

    /// Rewrites the display position.
    pub fn set_display_order(&mut self, order: u32) {
        self.display_order = order;
        self.updated_at = Timestamp::now();
    }
}
