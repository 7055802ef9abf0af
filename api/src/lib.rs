use std::sync::Arc;

pub mod common;
pub mod error_handler;
mod routes;

use ai_llm_service::LlmClient;
use axum::{
    Router,
    routing::{get, post},
};
use fruit_catalog::{Catalog, seed::seed_records};
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    common::app_state::{AppConfig, AppState, ConfigError},
    error_handler::AppError,
    routes::{
        chat::chat_route::chat, fruits::get_fruit_route::get_fruit, health::health_route::health,
    },
};

/// Builds the LLM client, reseeds the catalog and serves until Ctrl+C.
pub async fn start(config: AppConfig) -> Result<(), AppError> {
    let llm = LlmClient::new(config.llm.clone()).map_err(ConfigError::from)?;
    info!(provider = ?llm.provider(), model = %config.llm.model, "LLM client ready");

    let catalog = Catalog::new(&config.db_path);
    let seeded = catalog.reset(seed_records()).await?;
    info!(db = %config.db_path, rows = seeded, "catalog seeded");

    let state = Arc::new(AppState::new(catalog, Arc::new(llm)));
    let app = router(state, cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&config.api_address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.api_address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Routes of the fruit store API.
pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/fruits/{name}", get(get_fruit))
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured origins; methods and headers are mirrored.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{
        AiLlmError, LlmModelConfig, LlmProvider, TextGenerator,
        error_handler::{ProviderError, ProviderErrorKind},
    };
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    struct Stub(Option<&'static str>);

    #[async_trait]
    impl TextGenerator for Stub {
        async fn generate(&self, _prompt: &str) -> Result<String, AiLlmError> {
            self.0.map(str::to_string).ok_or_else(|| {
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyResponse).into()
            })
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            api_address: "127.0.0.1:0".into(),
            db_path: String::new(),
            cors_origins: vec!["http://localhost:3000".parse().unwrap()],
            llm: LlmModelConfig {
                provider: LlmProvider::Gemini,
                model: "models/gemini-1.5-flash".into(),
                endpoint: "https://generativelanguage.googleapis.com".into(),
                api_key: Some("test".into()),
                max_tokens: None,
                temperature: Some(0.0),
                timeout_secs: None,
            },
        }
    }

    async fn app(reply: Option<&'static str>) -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path().join("fruits.db"));
        catalog.reset(seed_records()).await.unwrap();
        let state = Arc::new(AppState::new(catalog, Arc::new(Stub(reply))));
        (dir, router(state, cors_layer(&test_config())))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::post("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn get_fruit_is_case_insensitive() {
        let (_dir, app) = app(None).await;
        for uri in ["/fruits/BANANA", "/fruits/banana", "/fruits/BaNaNa"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"name": "Banana", "price": 3.5, "stock": 120}));
        }
    }

    #[tokio::test]
    async fn get_fruit_decodes_percent_encoded_names() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, get("/fruits/ma%C3%A7%C3%A3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Maçã");
    }

    #[tokio::test]
    async fn get_unknown_fruit_is_404_with_detail() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, get("/fruits/abacate")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Fruta não encontrada");
    }

    #[tokio::test]
    async fn chat_answers_with_heuristic_when_model_is_down() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, post_chat(r#"{"pergunta":"Quanto custa a manga?"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "O preço da Manga é R$ 5.0."}));
    }

    #[tokio::test]
    async fn chat_ambiguous_question_is_422() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, post_chat(r#"{"pergunta":"abacaxi"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "AMBIGUOUS_QUESTION");
        assert!(body["detail"].as_str().unwrap().starts_with("Não consegui entender"));
    }

    #[tokio::test]
    async fn chat_unknown_fruit_is_404() {
        let (_dir, app) = app(Some(r#"{"fruit":"abacate","info":"preço"}"#)).await;
        let (status, body) = send(app, post_chat(r#"{"pergunta":"Quanto custa o abacate?"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "FRUIT_NOT_FOUND");
    }

    #[tokio::test]
    async fn chat_unsupported_info_is_422() {
        let (_dir, app) = app(Some(r#"{"fruit":"uva","info":"cor"}"#)).await;
        let (status, body) = send(app, post_chat(r#"{"pergunta":"Qual a cor da uva?"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "UNSUPPORTED_INFO_KIND");
    }

    #[tokio::test]
    async fn chat_without_pergunta_is_422() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, post_chat(r#"{"question":"oi"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn health_reports_catalog_size() {
        let (_dir, app) = app(None).await;
        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "fruits": 20}));
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let (_dir, app) = app(None).await;
        let req = Request::get("/fruits/kiwi")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }
}
