use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upstream profile API; takes precedence over `database_url`.
    pub submission_url: Option<String>,
    pub submission_token: Option<String>,
    pub database_url: Option<String>,
    pub strict_step_validation: bool,
    pub require_confirmation: bool,
    /// Idle wizard sessions older than this are dropped.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            submission_url: optional_env("SUBMISSION_URL"),
            submission_token: optional_env("SUBMISSION_TOKEN"),
            database_url: optional_env("DATABASE_URL"),
            strict_step_validation: flag_env("STRICT_STEP_VALIDATION")?,
            require_confirmation: flag_env("REQUIRE_CONFIRMATION")?,
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn flag_env(key: &str) -> Result<bool> {
    match optional_env(key) {
        None => Ok(false),
        Some(v) => parse_flag(&v).with_context(|| format!("{key} must be true or false, got '{v}'")),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
