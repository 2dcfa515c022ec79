use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::interface::EmbeddingModel;
use super::remote::RemoteEmbeddingModel;
use crate::config::{BackendKind, EmbeddingConfig};

/// Factory for embedding models
pub struct EmbeddingFactory;

impl EmbeddingFactory {
    /// Create the model selected by `config.backend`.
    ///
    /// Local models are loaded before this returns.
    pub async fn create_model(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingModel>> {
        match config.backend {
            BackendKind::Remote => {
                info!(
                    "Using remote embedding model {} at {}",
                    config.model, config.base_url
                );
                Ok(Arc::new(RemoteEmbeddingModel::new(
                    &config.base_url,
                    &config.model,
                )))
            }
            BackendKind::Local => Self::create_local(config).await,
        }
    }

    #[cfg(feature = "local-models")]
    async fn create_local(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingModel>> {
        let model = super::local::LocalEmbeddingModel::load(&config.model).await?;
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "local-models"))]
    async fn create_local(_config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingModel>> {
        anyhow::bail!("embedding backend `local` requires the `local-models` feature")
    }
}
