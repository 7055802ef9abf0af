use fruit_catalog::Catalog;
use tracing::{debug, info, instrument};

use crate::{
    errors::AssistantError,
    interpreter::QuestionInterpreter,
    question::{InfoKind, InterpretedQuestion},
};

/// Answers free-text questions about the catalog.
#[derive(Clone)]
pub struct FruitAssistant {
    interpreter: QuestionInterpreter,
    catalog: Catalog,
}

impl FruitAssistant {
    pub fn new(interpreter: QuestionInterpreter, catalog: Catalog) -> Self {
        Self {
            interpreter,
            catalog,
        }
    }

    /// Interprets `question` and renders the answer sentence.
    ///
    /// # Errors
    /// - [`AssistantError::AmbiguousQuestion`] when no fruit or info kind was found
    /// - [`AssistantError::FruitNotFound`] when the fruit is not in the catalog
    /// - [`AssistantError::UnsupportedInfoKind`] when the model asked for something else
    /// - [`AssistantError::Catalog`] when the catalog cannot be read
    #[instrument(skip_all)]
    pub async fn answer(&self, question: &str) -> Result<String, AssistantError> {
        let InterpretedQuestion { fruit, info } = self.interpreter.interpret(question).await;
        debug!(%fruit, info = ?info, "question interpreted");

        let fruit = fruit.trim();
        let info = match info {
            Some(info) if !fruit.is_empty() => info,
            _ => return Err(AssistantError::AmbiguousQuestion),
        };

        let record = self
            .catalog
            .find_by_name(fruit)
            .await?
            .ok_or(AssistantError::FruitNotFound)?;

        let answer = match info {
            InfoKind::Price => format!(
                "O preço da {} é R$ {}.",
                record.name,
                format_price(record.price)
            ),
            InfoKind::Stock => format!(
                "Temos {} unidades de {} em estoque.",
                record.stock, record.name
            ),
            InfoKind::Unsupported(kind) => {
                debug!(%kind, "unsupported info kind");
                return Err(AssistantError::UnsupportedInfoKind);
            }
        };

        info!(fruit = %record.name, "answer composed");
        Ok(answer)
    }
}

/// Shortest decimal form that round-trips, always with a fractional part
/// (`5.0`, `3.5`, `10.5`).
pub fn format_price(price: f64) -> String {
    let s = price.to_string();
    if s.contains('.') || !price.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}
