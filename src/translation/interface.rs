use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A directed translation capability, e.g. `en` to `es`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePackage {
    #[serde(alias = "source")]
    pub source_language: String,
    #[serde(alias = "target")]
    pub target_language: String,
}

impl LanguagePackage {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_language: source.into(),
            target_language: target.into(),
        }
    }

    pub fn matches(&self, source: &str, target: &str) -> bool {
        self.source_language == source && self.target_language == target
    }
}

impl fmt::Display for LanguagePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source_language, self.target_language)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translation: String,
}

/// Translates text along one installed direction.
#[async_trait]
pub trait TranslationHandle: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error>;
}

/// Package registry and runtime of a translation engine
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Every directed pair the backend is able to install.
    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, anyhow::Error>;

    /// Installs `package` (downloading it if needed) and returns a handle for it.
    async fn install(
        &self,
        package: &LanguagePackage,
    ) -> Result<Arc<dyn TranslationHandle>, anyhow::Error>;
}
