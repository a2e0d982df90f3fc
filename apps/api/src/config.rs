use anyhow::{Context, Result};

use crate::llm_client::ApiKey;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 2200;

/// Application configuration loaded from environment variables.
/// The API key is optional here; callers may supply one per request instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<ApiKey>,
    pub openai_base_url: String,
    pub max_tokens: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY").map(ApiKey::new),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            max_tokens: match optional_env("CURATOR_MAX_TOKENS") {
                Some(raw) => raw
                    .parse::<u32>()
                    .context("CURATOR_MAX_TOKENS must be a positive integer")?,
                None => DEFAULT_MAX_TOKENS,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
