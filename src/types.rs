// Type definitions and enums

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LLMProvider {
    Google,
    OpenAI,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Google => write!(f, "google"),
            LLMProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(LLMProvider::Google),
            "openai" => Ok(LLMProvider::OpenAI),
            other => Err(format!("Unsupported LLM provider: {}", other)),
        }
    }
}

/// A single structured-output generation request.
///
/// `prompt` is the fully rendered instruction text; `output_field` names the
/// one string field the backend must return in its JSON reply.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub prompt: String,
    pub output_field: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    /// Value of the declared output field, extracted from the backend reply.
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File data is missing or incomplete.")]
    MissingInput,

    #[error("Failed to parse XLSX file: {0}")]
    UnreadableWorkbook(String),

    #[error("XLSX file is empty or has no sheets.")]
    EmptyWorkbook,

    #[error("Data cannot be empty after processing.")]
    EmptyPayload,

    #[error("Question cannot be empty.")]
    EmptyQuestion,

    #[error("LLM API error: {0}")]
    LLMApi(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("google".parse::<LLMProvider>().unwrap(), LLMProvider::Google);
        assert_eq!("gemini".parse::<LLMProvider>().unwrap(), LLMProvider::Google);
        assert_eq!("OpenAI".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
        assert!("mistral".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_error_messages_are_canonical() {
        assert_eq!(
            AppError::MissingInput.to_string(),
            "File data is missing or incomplete."
        );
        assert_eq!(
            AppError::EmptyPayload.to_string(),
            "Data cannot be empty after processing."
        );
        assert_eq!(
            AppError::EmptyWorkbook.to_string(),
            "XLSX file is empty or has no sheets."
        );
        assert_eq!(AppError::EmptyQuestion.to_string(), "Question cannot be empty.");
    }
}
