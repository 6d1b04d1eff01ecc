use anyhow::{Context, Result};

use crate::llm_client::LlmSettings;

const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_SUGGESTIONS_HEADING: &str = "## Additional Suggestions";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    /// Heading the LLM is asked to put before its suggestions; the split marker.
    pub suggestions_heading: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let anthropic_api_key = get("ANTHROPIC_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?;

        let llm_temperature = match get("LLM_TEMPERATURE") {
            Some(v) => v
                .parse::<f32>()
                .context("LLM_TEMPERATURE must be a number")?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=1.0).contains(&llm_temperature) {
            anyhow::bail!("LLM_TEMPERATURE must be between 0.0 and 1.0, got {llm_temperature}");
        }

        let suggestions_heading = get("SUGGESTIONS_HEADING")
            .unwrap_or_else(|| DEFAULT_SUGGESTIONS_HEADING.to_string());
        if suggestions_heading.trim().is_empty() {
            anyhow::bail!("SUGGESTIONS_HEADING cannot be blank");
        }

        Ok(Config {
            anthropic_api_key,
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_tokens: match get("LLM_MAX_TOKENS") {
                Some(v) => v
                    .parse::<u32>()
                    .context("LLM_MAX_TOKENS must be a positive integer")?,
                None => DEFAULT_MAX_TOKENS,
            },
            llm_temperature,
            suggestions_heading,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            model: self.llm_model.clone(),
            max_tokens: self.llm_max_tokens,
            temperature: self.llm_temperature,
        }
    }
}
