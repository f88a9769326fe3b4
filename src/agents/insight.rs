//! Insight Agent
//!
//! Orchestrates the two insight operations against a configured LLM backend.
//! Holds the one long-lived model client; constructed once at startup and
//! shared across requests. Requests share no mutable state and are never
//! memoized, so identical inputs issue independent model calls.

use tracing::info;

use crate::config::LLMConfig;
use crate::llm::provider::LLM;
use crate::models::DataSource;
use crate::normalize;
use crate::prompt::{self, PromptSpec};
use crate::types::{AppError, AppResult, LLMRequest};

pub struct InsightAgent {
    llm: LLM,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl InsightAgent {
    pub fn new(llm: LLM, config: &LLMConfig) -> Self {
        Self {
            llm,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Generate a free-form analysis of the uploaded data.
    pub async fn generate_general_insights(&self, source: &DataSource) -> AppResult<String> {
        let payload = normalize::prepare_payload(source)?;

        info!(payload_len = payload.len(), "Generating general insights");

        let spec = prompt::build_prompt(&payload, None);
        self.invoke(spec).await
    }

    /// Answer a question about the uploaded data.
    pub async fn answer_question(&self, source: &DataSource, question: &str) -> AppResult<String> {
        let payload = normalize::prepare_payload(source)?;

        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::EmptyQuestion);
        }

        info!(
            payload_len = payload.len(),
            question_len = question.len(),
            "Answering question"
        );

        let spec = prompt::build_prompt(&payload, Some(question));
        self.invoke(spec).await
    }

    async fn invoke(&self, spec: PromptSpec) -> AppResult<String> {
        let request = LLMRequest {
            model: self.model.clone(),
            prompt: spec.text,
            output_field: spec.output_field.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.llm.generate(&request).await?;

        info!(
            response_len = response.content.len(),
            total_tokens = response.usage.total_tokens,
            "Model invocation complete"
        );

        Ok(response.content)
    }
}
