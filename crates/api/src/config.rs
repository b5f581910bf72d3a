//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the TimetableGen
//! API server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout in seconds (default: 30)
//! - `TIMETABLE_SEED`: Default seed for subject draws (default: fresh per request)
//! - `AI_SERVICE`: `openai` or `gemini`; enables assisted generation
//! - `OPENAI_API_KEY` / `GEMINI_API_KEY`: Key for the selected service
//! - `AI_MODEL`: Model name override

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Language-model providers usable for assisted generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelService {
    OpenAi,
    Gemini,
}

impl ModelService {
    /// Model used when `AI_MODEL` is not set
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelService::OpenAi => "gpt-3.5-turbo",
            ModelService::Gemini => "gemini-pro",
        }
    }
}

/// Settings for the optional language-model backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub service: ModelService,
    pub api_key: String,
    pub model: String,
}

/// Configuration for the TimetableGen API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use timetablegen_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Seed used when a request does not carry one
    pub default_seed: Option<u64>,

    /// Language-model backend, if assisted generation is enabled
    pub model: Option<ModelConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            default_seed: None,
            model: None,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The TIMETABLE_SEED value cannot be parsed as a u64
    /// - AI_SERVICE names an unknown service, or its API key is missing
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Generation settings
        let default_seed = env::var("TIMETABLE_SEED")
            .ok()
            .map(|seed| seed.parse::<u64>())
            .transpose()
            .wrap_err("Invalid TIMETABLE_SEED value")?;

        let model = match env::var("AI_SERVICE").ok() {
            Some(service) => Some(model_config(
                &service,
                |name| env::var(name).ok(),
            )?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            default_seed,
            model,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO
pub fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Resolves the model backend for `service`, reading keys through `lookup`
pub fn model_config(service: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<ModelConfig> {
    let (service, key_var) = match service.trim().to_ascii_lowercase().as_str() {
        "openai" => (ModelService::OpenAi, "OPENAI_API_KEY"),
        "gemini" => (ModelService::Gemini, "GEMINI_API_KEY"),
        other => return Err(eyre!("Invalid AI_SERVICE value: {}", other)),
    };

    let api_key = lookup(key_var)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| eyre!("{} is not set in the environment variables", key_var))?;
    let model = lookup("AI_MODEL").unwrap_or_else(|| service.default_model().to_string());

    Ok(ModelConfig {
        service,
        api_key,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn openai_uses_default_model() {
        let config = model_config("openai", lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.service, ModelService::OpenAi);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.api_key, "sk-test");
    }

    #[test]
    fn gemini_model_can_be_overridden() {
        let config = model_config(
            "Gemini",
            lookup(&[("GEMINI_API_KEY", "g-key"), ("AI_MODEL", "gemini-1.5-pro")]),
        )
        .unwrap();
        assert_eq!(config.service, ModelService::Gemini);
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = model_config("openai", lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn unknown_service_is_an_error() {
        assert!(model_config("claude", lookup(&[("OPENAI_API_KEY", "x")])).is_err());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        assert_eq!(parse_log_level("verbose"), Level::INFO);
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
    }
}
