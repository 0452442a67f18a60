use tracing::{info, warn};

use crate::error::{MoodError, Result};

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_PORT: u16 = 3000;

/// Startup configuration. Built once per process and shared read-only.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Failed to read .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| MoodError::Config(format!("{API_KEY_VAR} not found in environment")))?;

        let model = lookup("MOODX_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = lookup("MOODX_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| MoodError::Config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            model,
            endpoint,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, MoodError::Config(_)));
    }

    #[test]
    fn blank_api_key_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, MoodError::Config(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "gsk_test")])).unwrap();
        assert_eq!(config.api_key, "gsk_test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "gsk_test"),
            ("MOODX_MODEL", "llama-3.3-70b-versatile"),
            ("MOODX_ENDPOINT", "http://localhost:9999/v1/chat/completions"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.endpoint, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, MoodError::Config(_)));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "gsk_secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("gsk_secret"));
    }
}
