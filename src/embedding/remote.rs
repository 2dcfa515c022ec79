use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::interface::EmbeddingModel;

/// Model served by a text-embeddings-inference compatible server.
#[derive(Debug, Clone)]
pub struct RemoteEmbeddingModel {
    client: Client,
    base_url: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct EmbedBody<'a> {
    inputs: &'a str,
}

impl RemoteEmbeddingModel {
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl EmbeddingModel for RemoteEmbeddingModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let url = format!("{}/embed", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbedBody { inputs: text })
            .send()
            .await
            .with_context(|| format!("failed to reach {}", url))?
            .error_for_status()?;

        // One input in, one vector out
        let mut vectors: Vec<Vec<f32>> = response.json().await?;
        vectors
            .pop()
            .ok_or_else(|| anyhow!("{} returned no embedding", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_router;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_embed_unwraps_single_vector() {
        let router = Router::new().route(
            "/embed",
            post(|Json(body): Json<Value>| async move {
                let len = body["inputs"].as_str().unwrap_or_default().len() as f32;
                Json(json!([[len, 0.5, -0.5]]))
            }),
        );
        let base_url = spawn_router(router).await;
        let model = RemoteEmbeddingModel::new(base_url, "sentence-transformers/all-MiniLM-L6-v2");

        assert_eq!(model.embed("cat").await.unwrap(), vec![3.0, 0.5, -0.5]);
        assert_eq!(model.name(), "sentence-transformers/all-MiniLM-L6-v2");
    }

    #[tokio::test]
    async fn test_empty_batch_is_an_error() {
        let router = Router::new().route("/embed", post(|| async { Json(json!([])) }));
        let base_url = spawn_router(router).await;
        let model = RemoteEmbeddingModel::new(base_url, "m");

        assert!(model.embed("cat").await.is_err());
    }
}
