use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A sentence embedding model
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Model identifier, e.g. `sentence-transformers/all-MiniLM-L6-v2`
    fn name(&self) -> &str;

    /// Embed a single text. The output length is fixed for a given model.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}
