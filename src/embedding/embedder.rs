use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::interface::EmbeddingModel;

const PROBE_TEXT: &str = "embedding dimension probe";

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Embedding model failed: {0:#}")]
    Model(#[source] anyhow::Error),

    #[error("Embedding has {actual} dimensions, model produces {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Shared front of the embedding model.
///
/// Holds the model for the lifetime of the process and guarantees every
/// returned vector has the same length.
pub struct Embedder {
    model: Arc<dyn EmbeddingModel>,
    dimension: usize,
}

impl Embedder {
    /// Runs one probe through `model` to confirm it is ready and learn its dimension.
    pub async fn load(model: Arc<dyn EmbeddingModel>) -> Result<Self, EmbedError> {
        let probe = model.embed(PROBE_TEXT).await.map_err(EmbedError::Model)?;
        info!(
            "Loaded embedding model {} ({} dimensions)",
            model.name(),
            probe.len()
        );

        Ok(Self {
            model,
            dimension: probe.len(),
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Text is forwarded as is, including the empty string.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        debug!("Embedding text (length: {})", text.len());
        let embedding = self.model.embed(text).await.map_err(EmbedError::Model)?;

        if embedding.len() != self.dimension {
            return Err(EmbedError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HashEmbedding;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_constant_length_across_inputs() {
        let embedder = Embedder::load(Arc::new(HashEmbedding::new(16))).await.unwrap();
        assert_eq!(embedder.dimension(), 16);

        for text in ["cat", "a much longer sentence about dogs", "", "日本語"] {
            let embedding = embedder.embed(text).await.unwrap();
            assert_eq!(embedding.len(), 16, "length for {text:?}");
        }
    }

    #[tokio::test]
    async fn test_identical_text_gives_identical_vector() {
        let embedder = Embedder::load(Arc::new(HashEmbedding::new(8))).await.unwrap();
        let first = embedder.embed("cat").await.unwrap();
        let second = embedder.embed("cat").await.unwrap();
        let other = embedder.embed("dog").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    /// Grows its output by one element per call.
    struct DriftingModel(AtomicUsize);

    #[async_trait]
    impl EmbeddingModel for DriftingModel {
        fn name(&self) -> &str {
            "drifting"
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
            let len = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(vec![0.0; len])
        }
    }

    #[tokio::test]
    async fn test_dimension_change_is_rejected() {
        let embedder = Embedder::load(Arc::new(DriftingModel(AtomicUsize::new(0))))
            .await
            .unwrap();
        assert_eq!(embedder.dimension(), 1);

        let err = embedder.embed("cat").await.unwrap_err();
        assert!(matches!(
            err,
            EmbedError::DimensionMismatch { expected: 1, actual: 2 }
        ));
    }

    #[tokio::test]
    async fn test_probe_failure_fails_load() {
        let result = Embedder::load(Arc::new(HashEmbedding::failing())).await;
        assert!(matches!(result, Err(EmbedError::Model(_))));
    }
}
