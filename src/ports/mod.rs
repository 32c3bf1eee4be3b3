//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ModelClient` - Outbound text generation against one model
//! - `StoryRepository` - Story aggregate persistence
//! - `MessageRepository` - Append-only transcript persistence
//! - `SnippetRepository` - Snippet persistence and lifecycle queries

mod message_repository;
mod model_client;
mod snippet_repository;
mod story_repository;

pub use message_repository::MessageRepository;
pub use model_client::{ChatMessage, ChatRole, ModelClient, ModelCompletion, ModelError, ModelRequest};
pub use snippet_repository::SnippetRepository;
pub use story_repository::StoryRepository;
