use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fruit_assistant::AssistantError;
use fruit_catalog::errors::CatalogError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::common::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("{0}")]
    InvalidBody(String),

    #[error("Fruta não encontrada")]
    FruitNotFound,

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error("catalog error")]
    Catalog(#[from] CatalogError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FruitNotFound => StatusCode::NOT_FOUND,
            AppError::Assistant(e) => {
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }

            // 5xx
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::InvalidBody(_) => "INVALID_BODY",
            AppError::FruitNotFound => "FRUIT_NOT_FOUND",
            AppError::Assistant(e) => e.code(),
            AppError::Catalog(_) => "CATALOG_ERROR",
        }
    }

    /// Message shown to the client. Internal failures stay generic.
    fn detail(&self) -> String {
        match self {
            AppError::Catalog(_) | AppError::Assistant(AssistantError::Catalog(_)) => {
                "Erro interno ao consultar o catálogo de frutas.".into()
            }
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                "Erro interno do servidor.".into()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        let body = ErrorBody {
            code: self.error_code(),
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidBody(err.body_text())
    }
}
