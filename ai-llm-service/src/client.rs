//! Provider-agnostic entry point.
//!
//! Construct one [`LlmClient`] at bootstrap, wrap it in `Arc`, and hand it to
//! dependents as `Arc<dyn TextGenerator>`. Tests substitute their own
//! [`TextGenerator`] to script model replies without touching the network.

use async_trait::async_trait;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{gemini_service::GeminiService, ollama_service::OllamaService},
};

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` as a single user turn and returns the raw model text.
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError>;
}

/// Concrete client dispatching to the configured provider.
#[derive(Debug)]
pub enum LlmClient {
    Gemini(GeminiService),
    Ollama(OllamaService),
}

impl LlmClient {
    /// Builds the provider-specific service for `cfg`.
    ///
    /// # Errors
    /// Propagates constructor validation errors of the selected service.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(match cfg.provider {
            LlmProvider::Gemini => Self::Gemini(GeminiService::new(cfg)?),
            LlmProvider::Ollama => Self::Ollama(OllamaService::new(cfg)?),
        })
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            Self::Gemini(_) => LlmProvider::Gemini,
            Self::Ollama(_) => LlmProvider::Ollama,
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        match self {
            Self::Gemini(svc) => svc.generate(prompt).await,
            Self::Ollama(svc) => svc.generate(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_configured_provider() {
        let client = LlmClient::new(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint: "http://127.0.0.1:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(1),
        })
        .unwrap();
        assert_eq!(client.provider(), LlmProvider::Ollama);
    }

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_transport_error() {
        // Port 9 (discard) is closed on typical hosts; the connect fails fast.
        let client = LlmClient::new(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "m".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(2),
        })
        .unwrap();
        let err = client.generate("oi").await.unwrap_err();
        assert!(matches!(err, AiLlmError::HttpTransport(_)));
    }
}
