//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model clients (Gemini, mock) and the fallback cascade
//! - `memory` - In-memory repositories for tests and development

pub mod ai;
pub mod memory;

pub use ai::{CascadeClient, CascadeError, GeminiClient, GeminiConfig, Generation, MockFailure, MockModelClient};
pub use memory::{InMemoryMessageRepository, InMemorySnippetRepository, InMemoryStoryRepository};
