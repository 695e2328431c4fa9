use anyhow::{anyhow, Context, Result};

use crate::analysis::models::Language;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Used when neither the request nor the CV names a language.
    pub default_language: Language,
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
            default_language: parse_language(
                &std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            )?,
        })
    }
}

fn parse_language(value: &str) -> Result<Language> {
    value.parse::<Language>().map_err(|e| {
        let supported: Vec<String> = Language::ALL
            .iter()
            .map(|l| format!("{l:?}").to_lowercase())
            .collect();
        anyhow!("DEFAULT_LANGUAGE must be one of {}: {e}", supported.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_accepts_supported_codes() {
        assert_eq!(parse_language("fr").unwrap(), Language::Fr);
        assert_eq!(parse_language("EN").unwrap(), Language::En);
    }

    #[test]
    fn test_parse_language_rejects_unknown() {
        let err = parse_language("it").unwrap_err();
        assert!(format!("{err:#}").contains("DEFAULT_LANGUAGE"));
    }
}
