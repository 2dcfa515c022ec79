use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::translation::{TranslationRequest, TranslationResponse};

/// HTTP client for the embedding and translation REST services.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    embedding_url: String,
    translate_url: String,
}

impl UpstreamClient {
    pub fn new(
        embedding_url: impl Into<String>,
        translate_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            embedding_url: embedding_url.into(),
            translate_url: translate_url.into(),
        })
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            text: text.to_string(),
        };
        let response: EmbeddingResponse = self
            .post_json(&self.embedding_url, &request)
            .await
            .context("error fetching embedding")?;
        Ok(response.embedding)
    }

    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let request = TranslationRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };
        let response: TranslationResponse = self
            .post_json(&self.translate_url, &request)
            .await
            .context("error fetching translation")?;
        Ok(response.translation)
    }

    /// POSTs `body` as JSON and decodes a 200 response.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(url).json(body).send().await?;
        if response.status() != StatusCode::OK {
            bail!("failed request: {}", response.status());
        }
        Ok(response.json().await?)
    }
}
