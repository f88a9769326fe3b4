use async_trait::async_trait;

use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn generate(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for a concrete LLM backend.
pub struct LLMProviderConfig {
    pub provider: LLMProvider,
    pub api_key: String,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(config: LLMProviderConfig) -> Self {
        let adapter: Box<dyn LLMAdapter> = match config.provider {
            LLMProvider::Google => {
                Box::new(crate::llm::google::GoogleAdapter::new(&config.api_key))
            }
            LLMProvider::OpenAI => {
                Box::new(crate::llm::openai::OpenAIAdapter::new(&config.api_key))
            }
        };

        Self {
            adapter,
            provider_name: config.provider.to_string(),
        }
    }

    /// Wrap an already constructed adapter. Lets callers (and tests) inject
    /// a custom backend.
    pub fn from_adapter(adapter: Box<dyn LLMAdapter>, provider_name: impl Into<String>) -> Self {
        Self {
            adapter,
            provider_name: provider_name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn generate(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.generate(request).await
    }
}

/// Extract the declared output field from a backend JSON reply.
pub(crate) fn extract_output_field(raw: &str, field: &str) -> AppResult<String> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| AppError::LLMApi(format!("Backend returned malformed JSON: {}", e)))?;

    match value.get(field) {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::LLMApi(format!(
            "Backend reply field '{}' is not a string",
            field
        ))),
        None => Err(AppError::LLMApi(format!(
            "Backend reply is missing the '{}' field",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_output_field() {
        let raw = r#"{"insights": "Sales rose in Q2."}"#;
        assert_eq!(
            extract_output_field(raw, "insights").unwrap(),
            "Sales rose in Q2."
        );
    }

    #[test]
    fn test_extract_missing_field_is_an_error() {
        let err = extract_output_field(r#"{"other": "x"}"#, "answer").unwrap_err();
        assert!(err.to_string().contains("missing the 'answer' field"));
    }

    #[test]
    fn test_extract_non_string_field_is_an_error() {
        let err = extract_output_field(r#"{"answer": 3}"#, "answer").unwrap_err();
        assert!(err.to_string().contains("is not a string"));
    }

    #[test]
    fn test_extract_malformed_json_is_an_error() {
        let err = extract_output_field("not json", "answer").unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
