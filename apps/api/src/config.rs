use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_COMPLETIONS_URL;

/// Application configuration loaded from environment variables.
/// Nothing here is required: the API key may also arrive with each request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default credential used when a request does not carry its own key.
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETIONS_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Returns the variable's value, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
