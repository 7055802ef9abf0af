use serde::{Deserialize, Serialize};

/// Request payload for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text question in Portuguese.
    pub pergunta: String,
}

/// Response payload for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}
