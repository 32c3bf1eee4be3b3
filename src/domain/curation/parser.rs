//! Parsing and validation of the model's snippet payload.
//!
//! The extraction prompt asks for a JSON object with a `snippets`
//! array of title/content/theme entries. Models often wrap the object
//! in a markdown code fence, which is tolerated here. Entries with a
//! missing title or content are dropped; oversize fields are truncated
//! rather than rejected.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::{MAX_CONTENT_LEN, MAX_TITLE_LEN};

const DEFAULT_THEME: &str = "growth";

/// A validated snippet candidate, not yet persisted.
///
/// Carries no phase: the phase is stamped by the caller from the
/// chapter the source messages came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetDraft {
    pub title: String,
    pub content: String,
    pub theme: String,
}

#[derive(Debug, Deserialize)]
struct SnippetPayload {
    #[serde(default)]
    snippets: Vec<RawSnippet>,
}

#[derive(Debug, Deserialize)]
struct RawSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    theme: Option<String>,
}

/// Parses the model's reply into validated snippet drafts.
///
/// # Errors
///
/// - `ParseFailed` if the payload is not valid JSON of the expected shape
pub fn parse_snippet_payload(raw: &str) -> Result<Vec<SnippetDraft>, DomainError> {
    let text = strip_code_fence(raw);

    let payload: SnippetPayload = serde_json::from_str(text).map_err(|e| {
        DomainError::new(
            ErrorCode::ParseFailed,
            format!("Failed to parse snippet payload as JSON: {}", e),
        )
    })?;

    Ok(payload
        .snippets
        .into_iter()
        .filter_map(validate_snippet)
        .collect())
}

/// Removes a surrounding markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the fence line (which may carry a language tag) and the
    // closing fence.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => return text,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn validate_snippet(raw: RawSnippet) -> Option<SnippetDraft> {
    let title = raw.title.trim();
    let content = raw.content.trim();

    if title.is_empty() || content.is_empty() {
        return None;
    }

    let theme = raw
        .theme
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    Some(SnippetDraft {
        title: truncate(title, MAX_TITLE_LEN, false),
        content: truncate(content, MAX_CONTENT_LEN, true),
        theme,
    })
}

/// Truncates to a character budget, optionally appending an ellipsis
/// that fits within the budget.
fn truncate(text: &str, max: usize, ellipsis: bool) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    if ellipsis {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        text.chars().take(max).collect()
    }
}
