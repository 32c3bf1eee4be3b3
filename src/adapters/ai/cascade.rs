//! Model-fallback cascade.
//!
//! Tries each configured model in order. Rate-limit failures advance to
//! the next model; any other failure aborts the cascade immediately,
//! since it likely indicates a bad request rather than transient
//! capacity. Each invocation is independent: no caching, no cross-call
//! circuit breaker.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::ports::{ChatMessage, ModelClient, ModelError, ModelRequest};

/// Upper bound on aggregate request content, in characters.
const MAX_REQUEST_CHARS: usize = 50_000;

/// Default per-attempt timeout.
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Successful cascade result.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Generated text.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Number of models tried, including the winner.
    pub attempts: u32,
}

/// Cascade failure.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    /// Request rejected before any model was invoked.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Every configured model failed with a rate-limit signature.
    #[error("all {attempts} models exhausted rate limits")]
    Exhausted {
        /// Number of models tried.
        attempts: u32,
    },

    /// A model failed with a non-retryable error; no further models
    /// were tried.
    #[error("model {model} failed after {attempts} attempt(s): {source}")]
    Fatal {
        /// Model that failed.
        model: String,
        /// Attempts made, including the failing one.
        attempts: u32,
        /// The underlying provider error, surfaced verbatim.
        #[source]
        source: ModelError,
    },
}

/// Fallback wrapper that tries each model in a prioritized list.
#[derive(Clone)]
pub struct CascadeClient {
    client: Arc<dyn ModelClient>,
    models: Vec<String>,
    attempt_timeout: Duration,
    temperature: Option<f32>,
}

impl CascadeClient {
    /// Creates a cascade over the given client and model order.
    pub fn new(client: Arc<dyn ModelClient>, models: Vec<String>) -> Self {
        Self {
            client,
            models,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            temperature: None,
        }
    }

    /// Sets the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Sets the sampling temperature passed to every attempt.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The configured model order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generates a reply, falling back through the model list on rate
    /// limits.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for an empty history, an empty cascade, or a
    ///   request over the aggregate content bound (never retried)
    /// - `Exhausted` when every model rate-limits
    /// - `Fatal` on the first non-rate-limit failure
    pub async fn generate(
        &self,
        history: Vec<ChatMessage>,
        system_instruction: &str,
    ) -> Result<Generation, CascadeError> {
        if history.is_empty() {
            return Err(CascadeError::InvalidRequest(
                "message history cannot be empty".to_string(),
            ));
        }
        if self.models.is_empty() {
            return Err(CascadeError::InvalidRequest(
                "no models configured in cascade".to_string(),
            ));
        }

        let total_chars = system_instruction.chars().count()
            + history
                .iter()
                .map(|m| m.content.chars().count())
                .sum::<usize>();
        if total_chars > MAX_REQUEST_CHARS {
            return Err(CascadeError::InvalidRequest(format!(
                "request content is {} chars, limit is {}",
                total_chars, MAX_REQUEST_CHARS
            )));
        }

        let model_count = self.models.len() as u32;

        for (idx, model) in self.models.iter().enumerate() {
            let attempts = idx as u32 + 1;
            debug!(model = %model, attempt = attempts, total = model_count, "attempting generation");

            let mut request = ModelRequest::new(model)
                .with_system_instruction(system_instruction)
                .with_messages(history.clone());
            if let Some(temperature) = self.temperature {
                request = request.with_temperature(temperature);
            }

            let outcome = match timeout(self.attempt_timeout, self.client.complete(request)).await
            {
                Ok(result) => result,
                Err(_) => Err(ModelError::Timeout {
                    timeout_secs: self.attempt_timeout.as_secs() as u32,
                }),
            };

            match outcome {
                Ok(completion) => {
                    debug!(model = %model, attempts, "generation succeeded");
                    return Ok(Generation {
                        content: completion.content,
                        model: completion.model,
                        attempts,
                    });
                }
                Err(err) if err.is_rate_limited() => {
                    warn!(model = %model, attempts, error = %err, "rate limited, trying next model");
                    if attempts == model_count {
                        return Err(CascadeError::Exhausted {
                            attempts: model_count,
                        });
                    }
                }
                Err(err) => {
                    warn!(model = %model, attempts, error = %err, "fatal error, aborting cascade");
                    return Err(CascadeError::Fatal {
                        model: model.clone(),
                        attempts,
                        source: err,
                    });
                }
            }
        }

        Err(CascadeError::Exhausted {
            attempts: model_count,
        })
    }
}
