use std::sync::Arc;

use crate::agents::InsightAgent;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: Arc<InsightAgent>,
}

// Wire types matching the upload widget contract.

/// Descriptor for an uploaded file.
///
/// `content` is raw text, or a base64-encoded workbook when `is_binary` is
/// set. Created per request by the caller, consumed once, never persisted.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub content: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    #[serde(default)]
    pub is_binary: bool,
}

/// Input to either operation: a raw text payload, or a file descriptor that
/// still needs normalization.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    Raw(String),
    File(UploadedFile),
}

#[derive(Debug, serde::Deserialize)]
pub struct GenerateInsightsRequest {
    pub data: DataSource,
}

#[derive(Debug, serde::Deserialize)]
pub struct AskQuestionRequest {
    pub data: DataSource,
    pub question: String,
}

#[derive(Debug, serde::Serialize)]
pub struct InsightsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InsightsResponse {
    pub fn ok(insights: String) -> Self {
        Self {
            insights: Some(insights),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            insights: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AnswerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnswerResponse {
    pub fn ok(answer: String) -> Self {
        Self {
            answer: Some(answer),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            answer: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub provider: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_accepts_raw_text() {
        let source: DataSource = serde_json::from_str("\"a,b\\n1,2\"").unwrap();
        assert!(matches!(source, DataSource::Raw(ref s) if s == "a,b\n1,2"));
    }

    #[test]
    fn test_data_source_accepts_file_descriptor() {
        let json = r#"{
            "content": "a,b\n1,2",
            "fileName": "sales.csv",
            "fileType": "text/csv",
            "isBinary": false
        }"#;
        let source: DataSource = serde_json::from_str(json).unwrap();
        match source {
            DataSource::File(file) => {
                assert_eq!(file.content.as_deref(), Some("a,b\n1,2"));
                assert_eq!(file.file_name.as_deref(), Some("sales.csv"));
                assert_eq!(file.file_type.as_deref(), Some("text/csv"));
                assert!(!file.is_binary);
            }
            DataSource::Raw(_) => panic!("expected a file descriptor"),
        }
    }

    #[test]
    fn test_file_descriptor_defaults() {
        let source: DataSource = serde_json::from_str(r#"{"content": "x"}"#).unwrap();
        match source {
            DataSource::File(file) => {
                assert!(file.file_name.is_none());
                assert!(file.file_type.is_none());
                assert!(!file.is_binary);
            }
            DataSource::Raw(_) => panic!("expected a file descriptor"),
        }
    }

    #[test]
    fn test_response_envelope_shape() {
        let ok = serde_json::to_value(InsightsResponse::ok("text".to_string())).unwrap();
        assert_eq!(ok, serde_json::json!({"insights": "text"}));

        let err = serde_json::to_value(AnswerResponse::error("boom".to_string())).unwrap();
        assert_eq!(err, serde_json::json!({"error": "boom"}));
    }
}
