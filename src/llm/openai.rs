// OpenAI-compatible adapter
// Plain chat-completions call in JSON mode. The endpoint has no response
// schema parameter, so the required output shape is appended to the prompt
// and the declared field is extracted from the reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::provider::{extract_output_field, LLMAdapter};
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the chat-completions API
#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_format: OpenAIResponseFormat,
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

// Response types for the chat-completions API
#[derive(Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    /// Point the adapter at a non-default endpoint (Azure, a proxy, or a
    /// mock server in tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn generate(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        // JSON mode guarantees an object but not its shape; the shape is
        // stated in the prompt and enforced on extraction.
        let prompt = format!(
            "{}\n\nRespond with a JSON object containing a single \"{}\" string field.",
            request.prompt, request.output_field
        );

        let chat_request = OpenAIChatRequest {
            model: request.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: OpenAIResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "OpenAI API error ({}): {}",
                    status, error_response.error.message
                )));
            }

            return Err(AppError::LLMApi(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse OpenAI response: {}", e)))?;

        let choice = chat_response
            .choices
            .first()
            .ok_or_else(|| AppError::LLMApi("OpenAI returned no choices".to_string()))?;

        let raw = choice
            .message
            .content
            .as_deref()
            .ok_or_else(|| AppError::LLMApi("OpenAI returned an empty message".to_string()))?;

        let content = extract_output_field(raw, &request.output_field)?;

        let usage = chat_response.usage.unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: choice
                .finish_reason
                .clone()
                .unwrap_or_else(|| "stop".to_string()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LLMRequest {
        LLMRequest {
            model: "gpt-4o-mini".to_string(),
            prompt: "Answer this.".to_string(),
            output_field: "answer".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_extracts_declared_field_from_reply() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": "{\"answer\": \"3\"}" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 8, "completion_tokens": 4, "total_tokens": 12 }
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_base_url("test-key", &server.url());
        let response = adapter.generate(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "3");
        assert_eq!(response.usage.total_tokens, 12);
    }

    #[tokio::test]
    async fn test_backend_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        });
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_base_url("bad-key", &server.url());
        let err = adapter.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("Incorrect API key provided"));
    }
}
