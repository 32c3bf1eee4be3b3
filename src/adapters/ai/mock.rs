//! Mock model client for testing.
//!
//! Returns pre-configured outcomes in order and records every request,
//! allowing cascade and handler tests to run without a real provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ModelClient, ModelCompletion, ModelError, ModelRequest};

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success { content: String },
    Failure(MockFailure),
}

/// Mock failure modes for error-handling tests.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate rate limiting.
    RateLimited,
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a malformed provider response.
    Parse { message: String },
    /// Simulate a rejected request.
    InvalidRequest { message: String },
}

impl From<MockFailure> for ModelError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited => ModelError::rate_limited("mock rate limit"),
            MockFailure::Unavailable { message } => ModelError::unavailable(message),
            MockFailure::AuthenticationFailed => ModelError::AuthenticationFailed,
            MockFailure::Network { message } => ModelError::network(message),
            MockFailure::Parse { message } => ModelError::parse(message),
            MockFailure::InvalidRequest { message } => ModelError::InvalidRequest(message),
        }
    }
}

/// Mock model client with scripted outcomes and call recording.
#[derive(Debug, Clone)]
pub struct MockModelClient {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<ModelRequest>>>,
    delay: Duration,
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockModelClient {
    /// Creates a new mock with no scripted outcomes.
    ///
    /// With the queue empty, every call succeeds with a default reply.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(MockOutcome::Success {
            content: content.into(),
        });
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Failure(failure));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<ModelRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Success {
                content: "Mock response".to_string(),
            })
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, request: ModelRequest) -> Result<ModelCompletion, ModelError> {
        let model = request.model.clone();
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Success { content } => Ok(ModelCompletion { content, model }),
            MockOutcome::Failure(failure) => Err(failure.into()),
        }
    }
}
