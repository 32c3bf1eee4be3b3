//! Model client port - Interface for text-generation providers.
//!
//! A `ModelClient` performs a single generation attempt against one
//! named model. Cascading across models, timeouts, and retry policy
//! live in the adapter layer; this port only knows how to ask one
//! model one question.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for a single text-generation attempt.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion for the given request.
    ///
    /// # Errors
    ///
    /// - `RateLimited` when the provider signals quota exhaustion
    /// - `Timeout`, `Unavailable`, `Network` on transport problems
    /// - `AuthenticationFailed`, `InvalidRequest`, `Parse` on fatal
    ///   request or response errors
    async fn complete(&self, request: ModelRequest) -> Result<ModelCompletion, ModelError>;
}

/// A message in the conversation history sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

/// Request for one generation attempt against one model.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Opaque model identifier (e.g. "gemini-2.5-flash").
    pub model: String,
    /// System instruction defining persona and behavior.
    pub system_instruction: String,
    /// Prior conversation turns.
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
}

impl ModelRequest {
    /// Creates a new request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: String::new(),
            messages: Vec::new(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Adds a message to the history.
    pub fn with_message(mut self, role: ChatRole, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(role, content));
        self
    }

    /// Replaces the full message history.
    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Total characters across the system instruction and all messages.
    pub fn content_chars(&self) -> usize {
        self.system_instruction.chars().count()
            + self
                .messages
                .iter()
                .map(|m| m.content.chars().count())
                .sum::<usize>()
    }
}

/// Successful completion from one model attempt.
#[derive(Debug, Clone)]
pub struct ModelCompletion {
    /// Generated text.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
}

/// Errors from a single model attempt.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Rate limited by the provider.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Provider error details.
        message: String,
    },

    /// The attempt exceeded its timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ModelError {
    /// Creates a rate limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error signals rate limiting or quota
    /// exhaustion, and the cascade should try the next model.
    ///
    /// Besides the dedicated variant, rate-limit signatures carried in
    /// provider messages ("429", "resource exhausted", "rate limit",
    /// "quota") are recognized, since some providers surface quota
    /// failures as generic errors.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ModelError::RateLimited { .. } => true,
            ModelError::Unavailable { message } => has_rate_limit_signature(message),
            ModelError::Network(message) => has_rate_limit_signature(message),
            ModelError::InvalidRequest(message) => has_rate_limit_signature(message),
            _ => false,
        }
    }
}

fn has_rate_limit_signature(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ["429", "resource exhausted", "resource_exhausted", "rate limit", "quota"]
        .iter()
        .any(|sig| lowered.contains(sig))
}
