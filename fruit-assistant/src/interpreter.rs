//! Model-backed question interpretation with heuristic fallback.
//!
//! [`QuestionInterpreter::try_interpret`] reports every failure as an
//! [`InterpreterError`]; [`QuestionInterpreter::interpret`] is the public
//! contract and always yields an [`InterpretedQuestion`].

use std::sync::Arc;

use ai_llm_service::{AiLlmError, TextGenerator};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::{
    heuristic,
    prompt::build_interpretation_prompt,
    question::{InfoKind, InterpretedQuestion},
};

/// Why the model path produced nothing usable.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("model call failed: {0}")]
    Llm(#[from] AiLlmError),

    #[error("model reply is not the expected JSON object: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("model reply is JSON but not an object")]
    NotAnObject,

    #[error("model reply lacks a non-empty 'fruit' or 'info'")]
    MissingFields,
}

/// Interprets questions through an injected text generator.
#[derive(Clone)]
pub struct QuestionInterpreter {
    llm: Arc<dyn TextGenerator>,
}

impl QuestionInterpreter {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Interprets `question`, falling back to keyword matching on any failure.
    #[instrument(skip_all, fields(question_len = question.len()))]
    pub async fn interpret(&self, question: &str) -> InterpretedQuestion {
        match self.try_interpret(question).await {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, "model interpretation failed");
                warn!("using local keyword interpretation as fallback");
                heuristic::interpret(question)
            }
        }
    }

    /// One model round-trip, strictly validated.
    pub async fn try_interpret(
        &self,
        question: &str,
    ) -> Result<InterpretedQuestion, InterpreterError> {
        let prompt = build_interpretation_prompt(question);
        let raw = self.llm.generate(&prompt).await?;
        debug!(raw = %raw.trim(), "raw model reply");
        parse_model_reply(&raw)
    }
}

/// Parses a trimmed model reply into an [`InterpretedQuestion`].
///
/// The reply must be a JSON object with non-empty string `fruit` and `info`.
/// Extra keys are ignored.
pub fn parse_model_reply(raw: &str) -> Result<InterpretedQuestion, InterpreterError> {
    let value: Value = serde_json::from_str(raw.trim())?;
    let obj = value.as_object().ok_or(InterpreterError::NotAnObject)?;

    let field = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    match (field("fruit"), field("info")) {
        (Some(fruit), Some(info)) => Ok(InterpretedQuestion {
            fruit: fruit.to_string(),
            info: InfoKind::from_token(info),
        }),
        _ => Err(InterpreterError::MissingFields),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ai_llm_service::{
        LlmProvider,
        error_handler::{ProviderError, ProviderErrorKind},
    };
    use async_trait::async_trait;

    use super::*;

    /// Returns a canned reply and records the prompts it received.
    struct Scripted {
        reply: fn() -> Result<String, AiLlmError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(reply: fn() -> Result<String, AiLlmError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.reply)()
        }
    }

    fn provider_down() -> Result<String, AiLlmError> {
        Err(ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyResponse).into())
    }

    const QUESTIONS: &[&str] = &[
        "Quanto custa a banana?",
        "Temos morango em estoque?",
        "abacaxi",
        "Bom dia!",
        "Quanto custa o abacate?",
    ];

    async fn assert_falls_back(reply: fn() -> Result<String, AiLlmError>) {
        let interpreter = QuestionInterpreter::new(Scripted::new(reply));
        for q in QUESTIONS {
            assert_eq!(
                interpreter.interpret(q).await,
                heuristic::interpret(q),
                "question {q}"
            );
        }
    }

    #[tokio::test]
    async fn uses_model_reply_when_valid() {
        let llm = Scripted::new(|| Ok("  {\"fruit\": \"abacate\", \"info\": \"preço\"}\n".into()));
        let interpreter = QuestionInterpreter::new(llm.clone());

        let got = interpreter.interpret("Quanto custa o abacate?").await;
        assert_eq!(got, InterpretedQuestion::new("abacate", Some(InfoKind::Price)));

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Pergunta: Quanto custa o abacate?"));
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_heuristic() {
        assert_falls_back(provider_down).await;
    }

    #[tokio::test]
    async fn non_json_reply_falls_back_to_heuristic() {
        assert_falls_back(|| Ok("A fruta é banana e você quer o preço.".into())).await;
    }

    #[tokio::test]
    async fn fenced_json_is_malformed() {
        assert_falls_back(|| Ok("```json\n{\"fruit\":\"uva\",\"info\":\"preço\"}\n```".into()))
            .await;
    }

    #[tokio::test]
    async fn missing_or_empty_fields_fall_back_to_heuristic() {
        assert_falls_back(|| Ok(r#"{"fruit": "uva"}"#.into())).await;
        assert_falls_back(|| Ok(r#"{"fruit": "", "info": "estoque"}"#.into())).await;
        assert_falls_back(|| Ok(r#"{"fruit": null, "info": "estoque"}"#.into())).await;
    }

    #[tokio::test]
    async fn wrong_json_shape_falls_back_to_heuristic() {
        assert_falls_back(|| Ok(r#"["uva", "preço"]"#.into())).await;
        assert_falls_back(|| Ok(r#"{"fruit": 3, "info": "preço"}"#.into())).await;
    }

    #[test]
    fn unexpected_info_token_is_kept_as_unsupported() {
        let q = parse_model_reply(r#"{"fruit":"uva","info":"cor"}"#).unwrap();
        assert_eq!(q.info, Some(InfoKind::Unsupported("cor".into())));
    }

    #[test]
    fn parse_errors_are_classified() {
        assert!(matches!(
            parse_model_reply("nope"),
            Err(InterpreterError::MalformedJson(_))
        ));
        assert!(matches!(
            parse_model_reply(r#"{"info":"preço"}"#),
            Err(InterpreterError::MissingFields)
        ));
        assert!(matches!(
            parse_model_reply(r#"["uva", "preço"]"#),
            Err(InterpreterError::NotAnObject)
        ));
    }
}
