use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::error::ApiError;
use crate::state::GatewayState;
use crate::translation::TranslationResponse;

/// Gateway body; missing fields read as empty and are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GatewayRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl GatewayRequest {
    fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.source_language.is_empty() && !self.target_language.is_empty()
    }
}

pub fn create_gateway_routes(state: GatewayState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .with_state(state)
}

async fn translate(
    State(state): State<GatewayState>,
    payload: Result<Json<GatewayRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) if request.is_complete() => request,
        _ => return Err(ApiError::bad_request("Invalid or missing fields in request body")),
    };

    let translation = state
        .gateway
        .translate(
            &request.text,
            &request.source_language,
            &request.target_language,
        )
        .await
        .map_err(|e| {
            error!("Error processing translation: {}", e);
            ApiError::internal("Error processing translation")
        })?;

    Ok(Json(TranslationResponse { translation }))
}
