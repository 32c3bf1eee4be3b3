//! AI adapters.
//!
//! Implementations of the ModelClient port plus the fallback cascade
//! that retries across a prioritized model list on rate limits.
//!
//! ## Available Adapters
//!
//! - `GeminiClient` - Google Gemini generateContent API
//! - `MockModelClient` - Configurable mock for testing
//! - `CascadeClient` - Model-fallback wrapper over any ModelClient

mod cascade;
mod gemini;
mod mock;

pub use cascade::{CascadeClient, CascadeError, Generation};
pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{MockFailure, MockModelClient};
