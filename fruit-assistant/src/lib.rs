//! Fruit store assistant: interpret a Portuguese question, look the fruit up,
//! and phrase the answer.
//!
//! Public API: [`FruitAssistant::answer`]. Interpretation goes through the
//! configured model first and silently falls back to [`heuristic::interpret`].

mod composer;
mod errors;
pub mod heuristic;
pub mod interpreter;
mod prompt;
mod question;

pub use composer::{FruitAssistant, format_price};
pub use errors::AssistantError;
pub use interpreter::{InterpreterError, QuestionInterpreter};
pub use question::{InfoKind, InterpretedQuestion};
