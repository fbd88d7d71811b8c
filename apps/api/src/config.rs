use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_RESPONSES_URL;

const DEFAULT_DATABASE_URL: &str = "sqlite://coverletter.db?mode=rwc";
const DEFAULT_PORT: u16 = 8787;

/// Application configuration loaded from environment variables.
///
/// Every variable has a default. The OpenAI API key is deliberately NOT read
/// from the environment; it lives in the settings store.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub responses_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            responses_url: env_or("OPENAI_RESPONSES_URL", DEFAULT_RESPONSES_URL),
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                Err(_) => DEFAULT_PORT,
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
