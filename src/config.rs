use anyhow::Result;
use serde::Deserialize;
use std::env;

use crate::types::LLMProvider;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub google_api_key: String,
    pub openai_api_key: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LLMConfig {
    /// API key for the configured provider, if one is set.
    pub fn active_api_key(&self) -> Option<&str> {
        let key = match self.provider {
            LLMProvider::Google => self.google_api_key.as_str(),
            LLMProvider::OpenAI => self.openai_api_key.as_str(),
        };
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:9002".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER")
                    .unwrap_or_else(|_| "google".to_string())
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?,
                google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
                max_tokens: env::var("LLM_MAX_TOKENS")
                    .ok()
                    .map(|v| v.parse())
                    .transpose()?,
                temperature: env::var("LLM_TEMPERATURE")
                    .ok()
                    .map(|v| v.parse())
                    .transpose()?,
            },
        })
    }
}
