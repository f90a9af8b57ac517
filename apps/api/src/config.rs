use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Language the interviewer and generated company profiles answer in.
    pub interview_language: String,
    pub body_limit_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_api_url: optional("OPENAI_API_URL", DEFAULT_API_URL),
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
            interview_language: optional("INTERVIEW_LANGUAGE", "Korean"),
            body_limit_mb: optional("BODY_LIMIT_MB", "50")
                .parse::<usize>()
                .context("BODY_LIMIT_MB must be a whole number of megabytes")?,
        })
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/interviews"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.openai_api_url, DEFAULT_API_URL);
        assert_eq!(config.interview_language, "Korean");
        assert_eq!(config.body_limit_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/db")]))
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_required_value_counts_as_missing() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "  "),
            ("OPENAI_API_KEY", "sk-test"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_and_bad_port() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "3000"),
            ("INTERVIEW_LANGUAGE", "English"),
            ("BODY_LIMIT_MB", "10"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.interview_language, "English");
        assert_eq!(config.body_limit_mb, 10);

        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }
}
