use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::error::ApiError;
use crate::state::{EmbeddingState, TranslationState};
use crate::translation::{TranslationRequest, TranslationResponse};

pub fn create_embedding_routes(state: EmbeddingState) -> Router {
    Router::new()
        .route("/embed", post(embed))
        .route("/health", get(embedding_health))
        .with_state(state)
}

pub fn create_translation_routes(state: TranslationState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .route("/health", get(translation_health))
        .with_state(state)
}

async fn embed(
    State(state): State<EmbeddingState>,
    Json(request): Json<EmbeddingRequest>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    let embedding = state.embedder.embed(&request.text).await?;
    Ok(Json(EmbeddingResponse { embedding }))
}

async fn translate(
    State(state): State<TranslationState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let translation = state
        .translator
        .translate(
            &request.text,
            &request.source_language,
            &request.target_language,
        )
        .await?;
    Ok(Json(TranslationResponse { translation }))
}

async fn embedding_health(State(state): State<EmbeddingState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "embedding",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "model": state.embedder.model_name(),
        "dimension": state.embedder.dimension(),
    }))
}

async fn translation_health(State(state): State<TranslationState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "translation",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "backend": state.translator.backend(),
        "languages": state.translator.installed_languages(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Embedder;
    use crate::testing::{DictionaryBackend, HashEmbedding};
    use crate::translation::{LanguagePackage, Translator};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn embedding_app() -> Router {
        let embedder = Embedder::load(Arc::new(HashEmbedding::new(32))).await.unwrap();
        create_embedding_routes(EmbeddingState::new(Arc::new(embedder)))
    }

    async fn translation_app() -> Router {
        let packages = vec![
            LanguagePackage::new("en", "es"),
            LanguagePackage::new("es", "en"),
        ];
        let translator = Translator::initialize(&DictionaryBackend, &packages)
            .await
            .unwrap();
        create_translation_routes(TranslationState::new(Arc::new(translator)))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_embed_returns_fixed_length_and_repeats() {
        let app = embedding_app().await;

        let (status, first) = post_json(app.clone(), "/embed", json!({"text": "cat"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["embedding"].as_array().unwrap().len(), 32);

        let (status, second) = post_json(app, "/embed", json!({"text": "cat"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_embed_rejects_missing_text() {
        let app = embedding_app().await;
        let (status, _) = post_json(app, "/embed", json!({"content": "cat"})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_translate_installed_pair() {
        let app = translation_app().await;
        let (status, body) = post_json(
            app,
            "/translate",
            json!({"text": "Hello", "source_language": "en", "target_language": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"translation": "Hola"}));
    }

    #[tokio::test]
    async fn test_translate_unknown_target_is_bad_request() {
        let app = translation_app().await;
        let (status, body) = post_json(
            app,
            "/translate",
            json!({"text": "Hello", "source_language": "en", "target_language": "it"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Target language not installed: it");
    }

    #[tokio::test]
    async fn test_translate_backend_failure_is_server_error() {
        let app = translation_app().await;
        let (status, body) = post_json(
            app,
            "/translate",
            json!({"text": "fail", "source_language": "en", "target_language": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("engine crashed"));
    }

    #[tokio::test]
    async fn test_translation_health_lists_languages() {
        let app = translation_app().await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["languages"], json!(["en", "es"]));
        assert_eq!(body["backend"], "dictionary");
    }
}
