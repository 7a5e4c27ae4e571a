//! OpenAI-compatible chat-completions client
//!
//! Speaks the chat-completions protocol used by Perplexity, OpenAI, and
//! most hosted inference providers. One POST per completion, no retries:
//! the product contract is a single attempt with fallback on failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmError, PlannerClient};
use crate::config::LlmConfig;

/// Chat-completions API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Create a new client from configuration
    ///
    /// The API key is read from the configured environment variable here,
    /// once, and injected into the client. Nothing downstream touches the
    /// environment. A missing key is tolerated: the request will come back
    /// 401 and the planner falls back, same as any other failure.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "OpenAIClient::from_config: called");
        let api_key = std::env::var(&config.api_key_env).unwrap_or_else(|_| {
            warn!(env = %config.api_key_env, "API key env var not set; requests will fail and fall back");
            String::new()
        });

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the chat-completions API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %self.model, max_tokens = request.max_tokens, "build_request_body: called");
        let max_tokens = request.max_tokens.min(self.max_tokens);

        serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [
                {
                    "role": "system",
                    "content": request.system_prompt,
                },
                {
                    "role": "user",
                    "content": request.user_prompt,
                },
            ],
        })
    }

    /// Extract the assistant message content from the API response
    fn parse_response(&self, api_response: ChatResponse) -> Result<CompletionResponse, LlmError> {
        debug!(choice_count = %api_response.choices.len(), "parse_response: called");
        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))?;

        Ok(CompletionResponse { content })
    }
}

#[async_trait]
impl PlannerClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %self.model, "complete: called");
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        debug!("complete: success");
        let api_response: ChatResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// Chat-completions API response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAIClient {
        OpenAIClient {
            model: "mixtral-8x7b-instruct".to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://api.perplexity.ai".to_string(),
            http: Client::new(),
            max_tokens: 1024,
        }
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client();
        let request = CompletionRequest {
            system_prompt: "You are helpful".to_string(),
            user_prompt: "Plan a date".to_string(),
            max_tokens: 512,
        };

        let body = client.build_request_body(&request);

        assert_eq!(body["model"], "mixtral-8x7b-instruct");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Plan a date");
    }

    #[test]
    fn test_max_tokens_capped_by_config() {
        let client = test_client();
        let request = CompletionRequest {
            system_prompt: "Test".to_string(),
            user_prompt: "Hi".to_string(),
            max_tokens: 50_000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["max_tokens"], 1024);
    }

    #[test]
    fn test_parse_response_extracts_first_choice() {
        let client = test_client();
        let api_response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "{\"title\": \"X\"}"}}, {"message": {"content": "ignored"}}]}"#,
        )
        .unwrap();

        let response = client.parse_response(api_response).unwrap();
        assert_eq!(response.content, "{\"title\": \"X\"}");
    }

    #[test]
    fn test_parse_response_rejects_empty_choices() {
        let client = test_client();
        let api_response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let err = client.parse_response(api_response).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_response_rejects_null_content() {
        let client = test_client();
        let api_response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();

        assert!(client.parse_response(api_response).is_err());
    }

    #[test]
    fn test_from_config_tolerates_missing_key() {
        let config = LlmConfig {
            api_key_env: "PERFECTDATE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..LlmConfig::default()
        };

        let client = OpenAIClient::from_config(&config).unwrap();
        assert!(client.api_key.is_empty());
        assert_eq!(client.model, "mixtral-8x7b-instruct");
    }
}
