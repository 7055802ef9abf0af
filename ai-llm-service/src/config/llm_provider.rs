use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for LLM inference.
///
/// Adding more providers later is done by extending this enum and wiring a
/// matching service in [`crate::client::LlmClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini REST API (`generateContent`).
    Gemini,
    /// Local Ollama runtime for on-device inference.
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
