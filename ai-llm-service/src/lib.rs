//! Thin LLM client used by the fruit assistant.
//!
//! - [`client::LlmClient`] dispatches to Gemini or Ollama.
//! - [`client::TextGenerator`] is the seam the interpreter depends on.
//! - [`config::default_config`] resolves the model config from the environment.
//! - All failures are reported through [`error_handler::AiLlmError`].

pub mod client;
pub mod config;
pub mod error_handler;
pub mod services;

pub use client::{LlmClient, TextGenerator};
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
