//! Deterministic stand-ins for model backends used across unit tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use axum::Router;

use crate::embedding::EmbeddingModel;
use crate::translation::{LanguagePackage, TranslationBackend, TranslationHandle};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Embeds text by hashing it with a per-dimension seed.
pub struct HashEmbedding {
    dimension: usize,
    fail: bool,
}

impl HashEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            dimension: 0,
            fail: true,
        }
    }
}

#[async_trait]
impl EmbeddingModel for HashEmbedding {
    fn name(&self) -> &str {
        "hash-embedding"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        if self.fail {
            bail!("model unavailable");
        }
        Ok((0..self.dimension)
            .map(|i| {
                let mut hasher = DefaultHasher::new();
                (i, text).hash(&mut hasher);
                (hasher.finish() % 2000) as f32 / 1000.0 - 1.0
            })
            .collect())
    }
}

const PHRASES: &[(&str, &str, &str, &str)] = &[
    ("en", "es", "Hello", "Hola"),
    ("es", "en", "Hola", "Hello"),
    ("en", "de", "Hello", "Hallo"),
    ("de", "en", "Hallo", "Hello"),
    ("en", "fr", "Hello", "Bonjour"),
    ("fr", "en", "Bonjour", "Hello"),
];

/// Offers en/es/de/fr/zh pairs and translates from a fixed phrase list.
///
/// Unknown text comes back tagged with the target code; the text `fail` errors.
#[derive(Default)]
pub struct DictionaryBackend;

struct DictionaryHandle {
    package: LanguagePackage,
}

#[async_trait]
impl TranslationHandle for DictionaryHandle {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        if text == "fail" {
            return Err(anyhow!("engine crashed"));
        }
        let known = PHRASES.iter().find(|(source, target, phrase, _)| {
            self.package.matches(source, target) && *phrase == text
        });
        Ok(match known {
            Some((_, _, _, translation)) => translation.to_string(),
            None => format!("[{}] {}", self.package.target_language, text),
        })
    }
}

#[async_trait]
impl TranslationBackend for DictionaryBackend {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, anyhow::Error> {
        let mut packages: Vec<LanguagePackage> = PHRASES
            .iter()
            .map(|(source, target, _, _)| LanguagePackage::new(*source, *target))
            .collect();
        packages.push(LanguagePackage::new("en", "zh"));
        Ok(packages)
    }

    async fn install(
        &self,
        package: &LanguagePackage,
    ) -> Result<Arc<dyn TranslationHandle>, anyhow::Error> {
        Ok(Arc::new(DictionaryHandle {
            package: package.clone(),
        }))
    }
}
