//! CurateStoryHandler - Snippet generation across chapters.
//!
//! Groups the transcript by phase, asks the cascade for 1-3 short
//! third-person vignettes per eligible chapter, and reconciles the
//! results against existing snippets: locked snippets survive and are
//! echoed into the prompt as do-not-duplicate context, unlocked active
//! snippets are soft-deleted first, and new snippets continue the
//! display order after the surviving locked ones. A failing chapter is
//! recorded and skipped; the run succeeds if any chapter produced a
//! snippet.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::ai::CascadeClient;
use crate::domain::curation::{parse_snippet_payload, Snippet};
use crate::domain::foundation::{DomainError, StoryId};
use crate::domain::interview::Phase;
use crate::domain::transcript::{group_by_phase, Role, StoredMessage};
use crate::ports::{ChatMessage, MessageRepository, SnippetRepository, StoryRepository};

/// Minimum user-authored messages a chapter needs before extraction is
/// worthwhile.
const MIN_USER_MESSAGES_PER_CHAPTER: usize = 2;

/// Result of a curation run.
#[derive(Debug, Clone)]
pub struct CurateStoryResult {
    /// Snippets produced by this run, in display order.
    pub snippets: Vec<Snippet>,
    /// Number of snippets produced.
    pub count: usize,
    /// Last model that produced a chapter successfully.
    pub model: Option<String>,
    /// Chapters that failed, with their errors. Non-empty on partial
    /// success.
    pub errors_by_phase: Vec<(Phase, String)>,
}

/// Error type for curation.
#[derive(Debug, thiserror::Error)]
pub enum CurateStoryError {
    #[error("Story not found: {0}")]
    NotFound(StoryId),

    #[error("No messages found for this story")]
    EmptyTranscript,

    #[error("No chapters with enough material to curate")]
    NoEligibleChapters,

    #[error("Failed to generate any snippets across {} chapter(s): {}", .errors.len(), format_errors(.errors))]
    AllChaptersFailed { errors: Vec<(Phase, String)> },

    #[error("{0}")]
    Domain(#[from] DomainError),
}

fn format_errors(errors: &[(Phase, String)]) -> String {
    errors
        .iter()
        .map(|(phase, err)| format!("{}: {}", phase, err))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Handler for the snippet curation pipeline.
pub struct CurateStoryHandler {
    stories: Arc<dyn StoryRepository>,
    messages: Arc<dyn MessageRepository>,
    snippets: Arc<dyn SnippetRepository>,
    cascade: CascadeClient,
}

impl CurateStoryHandler {
    pub fn new(
        stories: Arc<dyn StoryRepository>,
        messages: Arc<dyn MessageRepository>,
        snippets: Arc<dyn SnippetRepository>,
        cascade: CascadeClient,
    ) -> Self {
        Self {
            stories,
            messages,
            snippets,
            cascade,
        }
    }

    pub async fn handle(&self, story_id: StoryId) -> Result<CurateStoryResult, CurateStoryError> {
        let story = self
            .stories
            .find_by_id(story_id)
            .await?
            .ok_or(CurateStoryError::NotFound(story_id))?;

        let transcript = self.messages.list_for_story(story.id).await?;
        if transcript.is_empty() {
            return Err(CurateStoryError::EmptyTranscript);
        }

        let grouped = group_by_phase(&transcript);

        let eligible: Vec<(Phase, &Vec<StoredMessage>)> = grouped
            .iter()
            .filter(|(phase, messages)| {
                let user_count = messages.iter().filter(|m| m.role == Role::User).count();
                if user_count < MIN_USER_MESSAGES_PER_CHAPTER {
                    debug!(
                        phase = %phase,
                        user_count,
                        "skipping chapter, not enough user messages"
                    );
                    return false;
                }
                true
            })
            .map(|(phase, messages)| (*phase, messages))
            .collect();

        if eligible.is_empty() {
            return Err(CurateStoryError::NoEligibleChapters);
        }

        // Capture locked snippets before any mutation; their content
        // feeds the do-not-duplicate prompt context.
        let locked = self.snippets.list_locked_active(story.id).await?;

        let archived = self.snippets.archive_unlocked(story.id).await?;
        debug!(archived, "archived unlocked snippets before regeneration");

        let mut display_order = locked
            .iter()
            .map(|s| s.display_order + 1)
            .max()
            .unwrap_or(0);

        let mut produced = Vec::new();
        let mut last_model = None;
        let mut errors_by_phase = Vec::new();

        // BTreeMap grouping means chapters arrive chronologically.
        for (phase, chapter_messages) in eligible {
            let instruction = build_extraction_instruction(phase, &locked);
            let prompt = build_chapter_prompt(phase, chapter_messages);

            let generation = match self
                .cascade
                .generate(vec![ChatMessage::user(prompt)], &instruction)
                .await
            {
                Ok(generation) => generation,
                Err(err) => {
                    warn!(phase = %phase, error = %err, "chapter generation failed");
                    errors_by_phase.push((phase, err.to_string()));
                    continue;
                }
            };

            let drafts = match parse_snippet_payload(&generation.content) {
                Ok(drafts) => drafts,
                Err(err) => {
                    warn!(phase = %phase, error = %err, "chapter payload did not parse");
                    errors_by_phase.push((phase, err.to_string()));
                    continue;
                }
            };

            last_model = Some(generation.model);

            // The phase is stamped from the chapter being processed,
            // never taken from model output.
            for draft in drafts {
                let snippet = Snippet::from_draft(story.id, draft, phase, display_order);
                self.snippets.insert(&snippet).await?;
                display_order += 1;
                produced.push(snippet);
            }
        }

        if produced.is_empty() {
            return Err(CurateStoryError::AllChaptersFailed {
                errors: errors_by_phase,
            });
        }

        Ok(CurateStoryResult {
            count: produced.len(),
            snippets: produced,
            model: last_model,
            errors_by_phase,
        })
    }
}

/// Builds the extraction instruction for one chapter, including the
/// locked snippets the model must not duplicate.
fn build_extraction_instruction(phase: Phase, locked: &[Snippet]) -> String {
    let mut locked_context = String::new();
    let phase_locked: Vec<_> = locked.iter().filter(|s| s.phase == phase).collect();

    if !phase_locked.is_empty() {
        let topics = phase_locked
            .iter()
            .map(|s| {
                let preview: String = s.content.chars().take(100).collect();
                if s.content.chars().count() > 100 {
                    format!("- {}: {}...", s.title, preview)
                } else {
                    format!("- {}: {}", s.title, preview)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        locked_context = format!(
            "\n\nIMPORTANT - EXISTING LOCKED CARDS FOR THIS CHAPTER (DO NOT DUPLICATE):\n\
            The following card(s) already exist for this chapter. Generate NEW content about DIFFERENT moments:\n\n{}",
            topics
        );
    }

    format!(
        "You are a story curator creating content for printable game cards.\n\n\
        Your task: Analyze this SINGLE CHAPTER of a life story and extract meaningful, emotionally resonant moments.\n\n\
        OUTPUT FORMAT: You MUST respond with ONLY valid JSON, no other text. Use this exact structure:\n\
        {{\n\
          \"snippets\": [\n\
            {{\n\
              \"title\": \"2-5 word catchy title\",\n\
              \"content\": \"The snippet text, max 300 characters. Written in third person, narrative style.\",\n\
              \"theme\": \"family|growth|challenge|adventure|love|legacy|identity|friendship\"\n\
            }}\n\
          ]\n\
        }}\n\n\
        RULES:\n\
        1. Generate 1-3 snippets based on chapter depth (fewer for short chapters)\n\
        2. Each snippet content MUST be under 300 characters\n\
        3. Write in third person (\"They discovered...\", \"Growing up, they...\")\n\
        4. Focus on emotional highlights, turning points, and defining moments from THIS chapter\n\
        5. Each snippet should stand alone as a meaningful story beat\n\
        6. If the chapter is very short or lacks meaningful content, generate just 1 snippet\n\
        7. ONLY output the JSON object, nothing else{}",
        locked_context
    )
}

/// Builds the user prompt carrying the chapter transcript.
fn build_chapter_prompt(phase: Phase, messages: &[StoredMessage]) -> String {
    let chapter_text = messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "USER",
                Role::Assistant => "ASSISTANT",
                Role::System => "SYSTEM",
            };
            format!("{}: {}", role, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze this chapter of a life story and generate snippets for game cards:\n\n\
        ---CHAPTER: {}---\n{}\n---END CHAPTER---\n\n\
        Remember: Output ONLY the JSON object with snippets array. Each snippet max 300 characters. \
        Do NOT include a \"phase\" field - the chapter is already known.",
        phase, chapter_text
    )
}
