// Google Gemini adapter
// Calls the generateContent endpoint with a declared JSON response schema so
// the reply carries exactly one named string field.
// API reference: https://ai.google.dev/api/generate-content

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::provider::{extract_output_field, LLMAdapter};
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the Gemini API
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

// Response types for the Gemini API
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize, Default)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GoogleAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Point the adapter at a non-default endpoint. Used by tests to target
    /// a local mock server.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Schema requiring a JSON object with exactly one named string field.
    fn response_schema(output_field: &str) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            output_field.to_string(),
            serde_json::json!({ "type": "STRING" }),
        );
        serde_json::json!({
            "type": "OBJECT",
            "properties": properties,
            "required": [output_field],
        })
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn generate(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);

        let gemini_request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(&request.output_field),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "Gemini API error ({}): {} (status: {:?})",
                    status, error_response.error.message, error_response.error.status
                )));
            }

            return Err(AppError::LLMApi(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = gemini_response
            .candidates
            .first()
            .ok_or_else(|| AppError::LLMApi("Gemini returned no candidates".to_string()))?;

        let raw: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();

        let content = extract_output_field(&raw, &request.output_field)?;

        let usage = gemini_response.usage_metadata.unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "stop".to_string()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LLMRequest {
        LLMRequest {
            model: "gemini-2.0-flash".to_string(),
            prompt: "Analyze this.".to_string(),
            output_field: "insights".to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.2),
        }
    }

    #[test]
    fn test_response_schema_declares_single_field() {
        let schema = GoogleAdapter::response_schema("answer");
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["answer"]["type"], "STRING");
        assert_eq!(schema["required"][0], "answer");
    }

    #[tokio::test]
    async fn test_extracts_declared_field_from_reply() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"insights\": \"Revenue is trending up.\"}" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15
            }
        });
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = GoogleAdapter::with_base_url("test-key", &server.url());
        let response = adapter.generate(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "Revenue is trending up.");
        assert_eq!(response.finish_reason, "STOP");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[tokio::test]
    async fn test_missing_output_field_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"summary\": \"wrong field\"}" }]
                },
                "finishReason": "STOP"
            }]
        });
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = GoogleAdapter::with_base_url("test-key", &server.url());
        let err = adapter.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("missing the 'insights' field"));
    }

    #[tokio::test]
    async fn test_backend_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "error": { "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        });
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = GoogleAdapter::with_base_url("bad-key", &server.url());
        let err = adapter.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }
}
