use std::time::Duration;

use anyhow::{Context, Result};

use crate::documents::DocumentStyle;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_FILENAME_PREFIX: &str = "FO";

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Used when a request body carries no `apiKey`.
    pub anthropic_api_key: Option<String>,
    /// Allowed CORS origins. Empty means permissive.
    pub cors_allowed_origins: Vec<String>,
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub document_style: DocumentStyle,
}

/// Connection settings for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Per-document generation limits and naming.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Prefix of every download filename, e.g. `FO_Cover_Letter.docx`.
    pub filename_prefix: String,
    pub resume_max_tokens: u32,
    pub cover_letter_max_tokens: u32,
    pub questions_max_tokens: u32,
    pub study_guide_max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            resume_max_tokens: 4096,
            cover_letter_max_tokens: 2000,
            questions_max_tokens: 3000,
            study_guide_max_tokens: 4000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            cors_allowed_origins: Vec::new(),
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
            document_style: DocumentStyle::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let timeout = match non_empty("LLM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.llm.timeout,
        };

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            port,
            rust_log: non_empty("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            cors_allowed_origins,
            llm: LlmConfig {
                api_url: non_empty("ANTHROPIC_API_URL").unwrap_or(defaults.llm.api_url),
                model: non_empty("LLM_MODEL").unwrap_or(defaults.llm.model),
                timeout,
            },
            generation: GenerationConfig {
                filename_prefix: non_empty("DOCUMENT_FILENAME_PREFIX")
                    .unwrap_or(defaults.generation.filename_prefix),
                ..defaults.generation
            },
            document_style: defaults
                .document_style
                .with_title_marker(non_empty("DOCUMENT_TITLE_MARKER")),
        })
    }
}
