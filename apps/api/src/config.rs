use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::errors::AppError;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
///
/// The Gemini key is deliberately optional here: a missing key fails each
/// request with a configuration error instead of stopping the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    /// Deadline applied to every single model call, including each fallback candidate.
    pub model_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("MODEL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_MODEL_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("MODEL_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            model_timeout: Duration::from_secs(timeout_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Per-request credential check shared by every generation endpoint.
    pub fn api_key(&self) -> Result<&str, AppError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
