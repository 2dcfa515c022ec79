use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::embedding::{EmbedError, Embedder};
use crate::proto::embed::embedder_server::{Embedder as EmbedderRpc, EmbedderServer};
use crate::proto::embed::{EmbeddingRequest, EmbeddingResponse};

pub struct EmbedderService {
    embedder: Arc<Embedder>,
}

impl EmbedderService {
    pub fn new(embedder: Arc<Embedder>) -> Self {
        Self { embedder }
    }

    pub fn into_server(self) -> EmbedderServer<Self> {
        EmbedderServer::new(self)
    }
}

#[tonic::async_trait]
impl EmbedderRpc for EmbedderService {
    async fn generate_embedding(
        &self,
        request: Request<EmbeddingRequest>,
    ) -> Result<Response<EmbeddingResponse>, Status> {
        let req = request.into_inner();

        tracing::info!("Generating embedding for text (length: {})", req.text.len());

        match self.embedder.embed(&req.text).await {
            Ok(embedding) => Ok(Response::new(EmbeddingResponse { embedding })),
            Err(e) => {
                tracing::error!("Failed to generate embedding: {}", e);
                Err(status_for(e))
            }
        }
    }
}

fn status_for(e: EmbedError) -> Status {
    Status::internal(format!("Embedding generation failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HashEmbedding;

    async fn service() -> EmbedderService {
        let embedder = Embedder::load(Arc::new(HashEmbedding::new(12))).await.unwrap();
        EmbedderService::new(Arc::new(embedder))
    }

    #[tokio::test]
    async fn test_generate_embedding() {
        let service = service().await;
        let response = service
            .generate_embedding(Request::new(EmbeddingRequest {
                text: "cat".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.embedding.len(), 12);
    }

    async fn embed(service: &EmbedderService, text: &str) -> Vec<f32> {
        service
            .generate_embedding(Request::new(EmbeddingRequest {
                text: text.to_string(),
            }))
            .await
            .unwrap()
            .into_inner()
            .embedding
    }

    #[tokio::test]
    async fn test_same_text_same_embedding() {
        let service = service().await;
        assert_eq!(embed(&service, "cat").await, embed(&service, "cat").await);
        assert_ne!(embed(&service, "cat").await, embed(&service, "dog").await);
    }

    #[test]
    fn test_model_error_maps_to_internal() {
        let status = status_for(EmbedError::DimensionMismatch {
            expected: 384,
            actual: 3,
        });
        assert_eq!(status.code(), tonic::Code::Internal);
    }
}
