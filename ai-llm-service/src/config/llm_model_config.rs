use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: which backend to call (Gemini, Ollama).
/// - `model`: model identifier (e.g. `"models/gemini-1.5-flash"`, `"qwen3:14b"`).
/// - `endpoint`: base URL of the inference API, without the route suffix.
/// - `api_key`: API key for providers that require authentication.
/// - `max_tokens`: maximum number of tokens to generate (if supported).
/// - `temperature`: sampling temperature; the interpreter wants near-deterministic JSON.
/// - `timeout_secs`: request timeout in seconds (`None` → 60s).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Endpoint with trailing slashes removed, ready for route concatenation.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}
