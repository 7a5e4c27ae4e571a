//! PlannerClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless completion client - each call is independent
///
/// The planner makes exactly one request per generation and treats any
/// failure as a signal to fall back, so the trait surface is a single
/// blocking completion call.
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Send a single completion request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Scripted outcome for one mock call
    pub enum MockReply {
        Content(String),
        Error(fn() -> LlmError),
    }

    /// Mock planner client for unit tests
    pub struct MockPlannerClient {
        replies: Mutex<Vec<MockReply>>,
        call_count: AtomicUsize,
    }

    impl MockPlannerClient {
        pub fn new(replies: Vec<MockReply>) -> Self {
            debug!(reply_count = %replies.len(), "MockPlannerClient::new: called");
            Self {
                replies: Mutex::new(replies),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Client that answers every call with the given content
        pub fn with_content(content: impl Into<String>) -> Self {
            Self::new(vec![MockReply::Content(content.into())])
        }

        /// Client that fails every call with the given error constructor
        pub fn with_error(make_error: fn() -> LlmError) -> Self {
            Self::new(vec![MockReply::Error(make_error)])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlannerClient for MockPlannerClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockPlannerClient::complete: called");
            let replies = self.replies.lock().expect("mock replies lock");
            // Replay the last scripted reply once the script runs out
            let reply = replies
                .get(idx)
                .or_else(|| replies.last())
                .ok_or_else(|| LlmError::InvalidResponse("No scripted mock replies".to_string()))?;
            match reply {
                MockReply::Content(content) => Ok(CompletionResponse {
                    content: content.clone(),
                }),
                MockReply::Error(make_error) => Err(make_error()),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_content() {
            let client = MockPlannerClient::with_content("hello");

            let request = CompletionRequest {
                system_prompt: "Test".to_string(),
                user_prompt: "Hi".to_string(),
                max_tokens: 100,
            };

            let response = client.complete(request.clone()).await.unwrap();
            assert_eq!(response.content, "hello");

            // Script replays after exhaustion
            let response = client.complete(request).await.unwrap();
            assert_eq!(response.content, "hello");
            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_returns_error() {
            let client = MockPlannerClient::with_error(|| LlmError::ApiError {
                status: 500,
                message: "boom".to_string(),
            });

            let request = CompletionRequest {
                system_prompt: "Test".to_string(),
                user_prompt: "Hi".to_string(),
                max_tokens: 100,
            };

            let err = client.complete(request).await.unwrap_err();
            assert_eq!(err.status(), Some(500));
        }
    }
}
