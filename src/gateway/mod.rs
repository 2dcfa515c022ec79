//! Translation front door with a semantic translation cache.
//!
//! Text is split into sentences, every sentence is embedded, and sentences
//! close enough to one translated before reuse that translation instead of
//! calling the translation service again.

pub mod cache;
pub mod postgres;
pub mod routes;
pub mod upstream;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GatewayConfig;
pub use cache::{
    CachedTranslation, MemoryTranslationCache, TranslationCache, DEFAULT_CACHE_CAPACITY,
};
pub use postgres::PgTranslationCache;
pub use routes::create_gateway_routes;
pub use upstream::UpstreamClient;

const SENTENCE_SEPARATOR: &str = ". ";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("error getting embedding: {0:#}")]
    Embedding(#[source] anyhow::Error),

    #[error("error getting translation: {0:#}")]
    Translation(#[source] anyhow::Error),

    #[error("error accessing cache: {0:#}")]
    Cache(#[source] anyhow::Error),
}

pub struct GatewayService {
    upstream: UpstreamClient,
    cache: Arc<dyn TranslationCache>,
    max_distance: f32,
}

impl GatewayService {
    pub fn new(upstream: UpstreamClient, cache: Arc<dyn TranslationCache>, max_distance: f32) -> Self {
        Self {
            upstream,
            cache,
            max_distance,
        }
    }

    /// Wires the upstream client and the cache selected by `config`.
    pub async fn from_config(config: &GatewayConfig) -> Result<Self> {
        let upstream = UpstreamClient::new(
            &config.embedding_url,
            &config.translate_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let cache: Arc<dyn TranslationCache> = match &config.database_url {
            Some(url) => Arc::new(PgTranslationCache::connect(url).await?),
            None => {
                warn!(
                    "No database_url configured, caching up to {} translations in memory",
                    config.cache_capacity
                );
                Arc::new(MemoryTranslationCache::new(config.cache_capacity))
            }
        };

        Ok(Self::new(upstream, cache, config.max_distance))
    }

    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, GatewayError> {
        let sentences: Vec<&str> = text.split(SENTENCE_SEPARATOR).collect();

        // Embed everything up front so a failing embedding costs no translations
        let mut embeddings = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            let embedding = self
                .upstream
                .embed(sentence)
                .await
                .map_err(GatewayError::Embedding)?;
            embeddings.push(embedding);
        }

        let mut translations = Vec::with_capacity(sentences.len());
        for (sentence, embedding) in sentences.iter().zip(embeddings) {
            let cached = self
                .cache
                .lookup(source_language, target_language, &embedding, self.max_distance)
                .await
                .map_err(GatewayError::Cache)?;

            if let Some(translation) = cached {
                info!("Using cached translation for: {}", sentence);
                translations.push(translation);
                continue;
            }

            info!("No cache found for: {}, fetching translation", sentence);
            let translation = self
                .upstream
                .translate(sentence, source_language, target_language)
                .await
                .map_err(GatewayError::Translation)?;

            self.cache
                .store(CachedTranslation {
                    source_language: source_language.to_string(),
                    target_language: target_language.to_string(),
                    embedding,
                    source_text: sentence.to_string(),
                    target_text: translation.clone(),
                })
                .await
                .map_err(GatewayError::Cache)?;
            translations.push(translation);
        }

        Ok(translations.join(SENTENCE_SEPARATOR))
    }
}
