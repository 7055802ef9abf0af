use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, LlmModelConfig, TextGenerator, config::default_config::config_from_lookup,
};
use axum::http::HeaderValue;
use fruit_assistant::{FruitAssistant, QuestionInterpreter};
use fruit_catalog::Catalog;
use thiserror::Error;

const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_DB_PATH: &str = "fruits.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("invalid origin in CORS_ORIGINS: {0:?}")]
    InvalidOrigin(String),
}

/// Process-wide settings, read once at bootstrap.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, e.g. "127.0.0.1:8000".
    pub api_address: String,
    /// SQLite file holding the `fruits` table.
    pub db_path: String,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<HeaderValue>,
    /// Model used to interpret questions.
    pub llm: LlmModelConfig,
}

impl AppConfig {
    /// Load settings from environment variables.
    ///
    /// A missing `GEMINI_API_KEY` (with the default Gemini provider) is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let cors_origins = var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.into())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            api_address: var("API_ADDRESS", DEFAULT_API_ADDRESS),
            db_path: var("FRUITS_DB_PATH", DEFAULT_DB_PATH),
            cors_origins,
            llm: config_from_lookup(&lookup)?,
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub assistant: FruitAssistant,
}

impl AppState {
    pub fn new(catalog: Catalog, llm: Arc<dyn TextGenerator>) -> Self {
        let assistant = FruitAssistant::new(QuestionInterpreter::new(llm), catalog.clone());
        Self { catalog, assistant }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ai_llm_service::{LlmProvider, error_handler::ConfigError as LlmConfigError};

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_mirror_local_development_setup() {
        let cfg = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(cfg.api_address, "127.0.0.1:8000");
        assert_eq!(cfg.db_path, "fruits.db");
        assert_eq!(
            cfg.cors_origins,
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]
        );
        assert_eq!(cfg.llm.provider, LlmProvider::Gemini);
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Llm(AiLlmError::Config(LlmConfigError::MissingVar(
                "GEMINI_API_KEY"
            )))
        ));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("CORS_ORIGINS", " https://loja.example , ,http://localhost:5173"),
        ]))
        .unwrap();
        assert_eq!(cfg.cors_origins.len(), 2);
        assert_eq!(cfg.cors_origins[0], "https://loja.example");
    }

    #[test]
    fn control_characters_in_origin_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("CORS_ORIGINS", "http://ok.example,bad\u{7f}origin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin(_)));
    }
}
