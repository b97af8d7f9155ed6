use anyhow::{Context, Result};

use crate::batch::orchestrator::DEFAULT_CONCURRENCY;
use crate::llm_client::ProviderKeys;

/// Application configuration loaded from environment variables.
/// Both provider keys are optional: with neither configured the service
/// still runs, scoring every candidate through the keyword matcher.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub batch_concurrency: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            batch_concurrency: std::env::var("BATCH_CONCURRENCY")
                .unwrap_or_else(|_| DEFAULT_CONCURRENCY.to_string())
                .parse::<usize>()
                .context("BATCH_CONCURRENCY must be a positive integer")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Default provider keys for batches that do not override them.
    pub fn provider_keys(&self) -> ProviderKeys {
        ProviderKeys {
            openai: self.openai_api_key.clone(),
            gemini: self.gemini_api_key.clone(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
