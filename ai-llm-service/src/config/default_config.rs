//! Default LLM config resolved from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`     = `gemini` (default) or `ollama`
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64)
//!
//! Gemini-specific:
//! - `GEMINI_API_KEY`    = API key (mandatory when the provider is Gemini)
//! - `GEMINI_MODEL_NAME` = model id, default `models/gemini-1.5-flash`
//! - `GEMINI_URL`        = API base, default `https://generativelanguage.googleapis.com`
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = model id (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, must_var, opt_number, opt_var, validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "models/gemini-1.5-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Interpretation must be stable, so sampling is kept cold.
const INTERPRETER_TEMPERATURE: f32 = 0.0;

/// Builds the model config from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds the model config from an arbitrary variable source.
///
/// # Errors
/// - [`ConfigError::MissingVar`] when `GEMINI_API_KEY` (Gemini) or the Ollama
///   endpoint/model are missing
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::InvalidFormat`] for bad values
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match opt_var(&lookup, "LLM_PROVIDER") {
        Some(raw) => raw.parse::<LlmProvider>()?,
        None => LlmProvider::Gemini,
    };

    let max_tokens = opt_number::<_, u32>(&lookup, "LLM_MAX_TOKENS", "expected u32")?;
    let timeout_secs = opt_number::<_, u64>(&lookup, "LLM_TIMEOUT_SECS", "expected u64")?;

    let cfg = match provider {
        LlmProvider::Gemini => {
            let api_key = must_var(&lookup, "GEMINI_API_KEY")?;
            let model = opt_var(&lookup, "GEMINI_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
            let endpoint =
                opt_var(&lookup, "GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string());
            validate_http_endpoint("GEMINI_URL", &endpoint)?;

            LlmModelConfig {
                provider,
                model,
                endpoint,
                api_key: Some(api_key),
                max_tokens,
                temperature: Some(INTERPRETER_TEMPERATURE),
                timeout_secs,
            }
        }
        LlmProvider::Ollama => LlmModelConfig {
            provider,
            model: must_var(&lookup, "OLLAMA_MODEL")?,
            endpoint: ollama_endpoint(&lookup)?,
            api_key: None,
            max_tokens,
            temperature: Some(INTERPRETER_TEMPERATURE),
            timeout_secs,
        },
    };

    if cfg.model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(cfg)
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint<F>(lookup: &F) -> Result<String, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = opt_var(lookup, "OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = opt_number::<_, u16>(lookup, "OLLAMA_PORT", "expected u16 (1..=65535)")? {
        return Ok(format!("http://localhost:{port}"));
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}
