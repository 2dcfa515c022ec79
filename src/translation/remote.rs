use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interface::{LanguagePackage, TranslationBackend, TranslationHandle};

/// Client for a LibreTranslate-compatible server (Argos packages behind HTTP).
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteLanguage {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: String,
}

impl LibreTranslateClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn languages(&self) -> Result<Vec<RemoteLanguage>> {
        let url = format!("{}/languages", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", url))?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = format!("{}/translate", self.base_url);
        let body = TranslateBody {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", url))?
            .error_for_status()?;
        let reply: TranslateReply = response.json().await?;
        Ok(reply.translated_text)
    }
}

/// Translation backend served by a remote LibreTranslate instance.
///
/// Available packages are whatever `/languages` advertises as targets. The
/// server may reach some of those by pivoting through English, so a pair
/// installed here is direct only from this side of the wire.
pub struct RemoteTranslationBackend {
    client: Arc<LibreTranslateClient>,
}

impl RemoteTranslationBackend {
    pub fn new(client: LibreTranslateClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

struct RemoteTranslation {
    client: Arc<LibreTranslateClient>,
    package: LanguagePackage,
}

#[async_trait]
impl TranslationHandle for RemoteTranslation {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        self.client
            .translate(
                text,
                &self.package.source_language,
                &self.package.target_language,
            )
            .await
    }
}

#[async_trait]
impl TranslationBackend for RemoteTranslationBackend {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, anyhow::Error> {
        let languages = self.client.languages().await?;
        Ok(languages
            .iter()
            .flat_map(|language| {
                language
                    .targets
                    .iter()
                    .filter(move |target| **target != language.code)
                    .map(move |target| LanguagePackage::new(&language.code, target))
            })
            .collect())
    }

    async fn install(
        &self,
        package: &LanguagePackage,
    ) -> Result<Arc<dyn TranslationHandle>, anyhow::Error> {
        // Models live on the server; installing only binds the direction
        debug!("Binding remote package {}", package);
        Ok(Arc::new(RemoteTranslation {
            client: self.client.clone(),
            package: package.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_router;
    use axum::{routing::{get, post}, Json, Router};
    use serde_json::{json, Value};

    fn libretranslate() -> Router {
        Router::new()
            .route(
                "/languages",
                get(|| async {
                    Json(json!([
                        {"code": "en", "name": "English", "targets": ["en", "es", "fr"]},
                        {"code": "es", "name": "Spanish", "targets": ["en"]}
                    ]))
                }),
            )
            .route(
                "/translate",
                post(|Json(body): Json<Value>| async move {
                    let q = body["q"].as_str().unwrap_or_default();
                    let target = body["target"].as_str().unwrap_or_default();
                    Json(json!({"translatedText": format!("{target}:{q}")}))
                }),
            )
    }

    #[tokio::test]
    async fn test_available_packages_from_language_targets() {
        let base_url = spawn_router(libretranslate()).await;
        let backend = RemoteTranslationBackend::new(LibreTranslateClient::new(base_url, None));

        let packages = backend.available_packages().await.unwrap();
        assert_eq!(
            packages,
            vec![
                LanguagePackage::new("en", "es"),
                LanguagePackage::new("en", "fr"),
                LanguagePackage::new("es", "en"),
            ]
        );
    }

    #[tokio::test]
    async fn test_installed_handle_posts_direction() {
        let base_url = spawn_router(libretranslate()).await;
        let backend = RemoteTranslationBackend::new(LibreTranslateClient::new(
            format!("{base_url}/"),
            Some("secret".to_string()),
        ));

        let handle = backend
            .install(&LanguagePackage::new("en", "es"))
            .await
            .unwrap();
        assert_eq!(handle.translate("Hello").await.unwrap(), "es:Hello");
    }

    #[tokio::test]
    async fn test_server_error_propagates() {
        let router = Router::new().route(
            "/translate",
            post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = spawn_router(router).await;
        let client = LibreTranslateClient::new(base_url, None);

        assert!(client.translate("Hello", "en", "es").await.is_err());
    }
}
