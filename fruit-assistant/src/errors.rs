//! Outcomes the assistant reports to its caller instead of an answer.

use fruit_catalog::errors::CatalogError;
use thiserror::Error;

/// Failure of [`crate::FruitAssistant::answer`]. Messages are user-facing (pt-BR).
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(
        "Não consegui entender sua pergunta. Tente mencionar uma fruta específica e se você quer preço ou estoque."
    )]
    AmbiguousQuestion,

    #[error("Não encontrei essa fruta no sistema. Verifique o nome e tente novamente.")]
    FruitNotFound,

    #[error(
        "Tipo de informação solicitado não é suportado. Use 'preço' ou 'estoque' na sua pergunta."
    )]
    UnsupportedInfoKind,

    /// Catalog could not be read; details stay in logs.
    #[error("Erro interno ao consultar o catálogo de frutas.")]
    Catalog(#[from] CatalogError),
}

impl AssistantError {
    /// HTTP-equivalent status for the boundary layer.
    pub fn status(&self) -> u16 {
        match self {
            Self::AmbiguousQuestion | Self::UnsupportedInfoKind => 422,
            Self::FruitNotFound => 404,
            Self::Catalog(_) => 500,
        }
    }

    /// Stable, machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AmbiguousQuestion => "AMBIGUOUS_QUESTION",
            Self::FruitNotFound => "FRUIT_NOT_FOUND",
            Self::UnsupportedInfoKind => "UNSUPPORTED_INFO_KIND",
            Self::Catalog(_) => "CATALOG_ERROR",
        }
    }
}
