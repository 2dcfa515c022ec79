use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::interface::TranslationBackend;
use super::remote::{LibreTranslateClient, RemoteTranslationBackend};
use crate::config::{BackendKind, TranslationConfig};

/// Factory for translation backends
pub struct TranslationFactory;

impl TranslationFactory {
    /// Create the backend selected by `config.backend`
    pub fn create_backend(config: &TranslationConfig) -> Result<Arc<dyn TranslationBackend>> {
        match config.backend {
            BackendKind::Remote => {
                info!("Using LibreTranslate backend at {}", config.base_url);
                let client = LibreTranslateClient::new(&config.base_url, config.api_key.clone());
                Ok(Arc::new(RemoteTranslationBackend::new(client)))
            }
            BackendKind::Local => Self::create_local(),
        }
    }

    #[cfg(feature = "local-models")]
    fn create_local() -> Result<Arc<dyn TranslationBackend>> {
        info!("Using in-process rust-bert translation backend");
        Ok(Arc::new(super::local::LocalTranslationBackend))
    }

    #[cfg(not(feature = "local-models"))]
    fn create_local() -> Result<Arc<dyn TranslationBackend>> {
        anyhow::bail!("translation backend `local` requires the `local-models` feature")
    }
}
