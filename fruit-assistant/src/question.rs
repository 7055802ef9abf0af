use std::fmt;

/// What the user wants to know about a fruit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoKind {
    Price,
    Stock,
    /// Any other token the model produced; kept so the composer can reject it.
    Unsupported(String),
}

impl InfoKind {
    /// Token used in prompts and model replies for [`InfoKind::Price`].
    pub const PRICE_TOKEN: &'static str = "preço";
    /// Token used in prompts and model replies for [`InfoKind::Stock`].
    pub const STOCK_TOKEN: &'static str = "estoque";

    /// Maps a reply token to a kind. Blank input yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "" => None,
            Self::PRICE_TOKEN => Some(Self::Price),
            Self::STOCK_TOKEN => Some(Self::Stock),
            other => Some(Self::Unsupported(other.to_string())),
        }
    }
}

impl fmt::Display for InfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => f.write_str(Self::PRICE_TOKEN),
            Self::Stock => f.write_str(Self::STOCK_TOKEN),
            Self::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// Result of interpreting one question. Either field may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterpretedQuestion {
    pub fruit: String,
    pub info: Option<InfoKind>,
}

impl InterpretedQuestion {
    pub fn new(fruit: impl Into<String>, info: Option<InfoKind>) -> Self {
        Self {
            fruit: fruit.into(),
            info,
        }
    }
}
