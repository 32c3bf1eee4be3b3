//! In-memory repository adapters.
//!
//! Reference implementations of the repository ports, backed by
//! `tokio::sync::RwLock`. Used by unit and integration tests and for
//! development without a database.

mod message_store;
mod snippet_store;
mod story_store;

pub use message_store::InMemoryMessageRepository;
pub use snippet_store::InMemorySnippetRepository;
pub use story_store::InMemoryStoryRepository;
