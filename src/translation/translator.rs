use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::interface::{LanguagePackage, TranslationBackend, TranslationHandle};

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Source language not installed: {0}")]
    SourceLanguageNotInstalled(String),

    #[error("Target language not installed: {0}")]
    TargetLanguageNotInstalled(String),

    #[error("No installed package translates {from} to {to}")]
    NoDirectTranslation { from: String, to: String },

    #[error("Translation package {0} is not available")]
    PackageUnavailable(LanguagePackage),

    #[error("Translation backend failed: {0:#}")]
    Backend(#[source] anyhow::Error),
}

impl TranslateError {
    /// Whether the caller can fix the request (e.g. by picking another language).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SourceLanguageNotInstalled(_)
                | Self::TargetLanguageNotInstalled(_)
                | Self::NoDirectTranslation { .. }
        )
    }
}

/// A language present in the installed set, with the directions leaving it.
pub struct InstalledLanguage {
    code: String,
    translations: HashMap<String, Arc<dyn TranslationHandle>>,
}

impl InstalledLanguage {
    fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            translations: HashMap::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Direct handle towards `to`, if a package for that direction is installed.
    pub fn get_translation(&self, to: &InstalledLanguage) -> Option<Arc<dyn TranslationHandle>> {
        self.translations.get(&to.code).cloned()
    }
}

/// Installed language packages and the translation entry point.
///
/// A `Translator` only exists once every configured package is installed.
pub struct Translator {
    backend: String,
    languages: HashMap<String, InstalledLanguage>,
}

impl Translator {
    /// Installs `packages` from `backend`.
    ///
    /// Fails on the first pair the backend does not offer; nothing is served
    /// from a partially installed set.
    pub async fn initialize(
        backend: &dyn TranslationBackend,
        packages: &[LanguagePackage],
    ) -> Result<Self, TranslateError> {
        let available = backend
            .available_packages()
            .await
            .map_err(TranslateError::Backend)?;
        debug!("{} offers {} packages", backend.name(), available.len());

        let mut languages: HashMap<String, InstalledLanguage> = HashMap::new();

        for requested in packages {
            let package = available
                .iter()
                .find(|p| p.matches(&requested.source_language, &requested.target_language))
                .ok_or_else(|| TranslateError::PackageUnavailable(requested.clone()))?;

            info!(
                "Installing translation package from {} to {}",
                package.source_language, package.target_language
            );
            let handle = backend
                .install(package)
                .await
                .map_err(TranslateError::Backend)?;

            languages
                .entry(package.source_language.clone())
                .or_insert_with(|| InstalledLanguage::new(&package.source_language))
                .translations
                .entry(package.target_language.clone())
                .or_insert(handle);
            languages
                .entry(package.target_language.clone())
                .or_insert_with(|| InstalledLanguage::new(&package.target_language));
        }

        let translator = Self {
            backend: backend.name().to_string(),
            languages,
        };
        info!("Installed languages: {:?}", translator.installed_languages());
        Ok(translator)
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Installed language codes, sorted.
    pub fn installed_languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        let from = self
            .languages
            .get(source_language)
            .ok_or_else(|| TranslateError::SourceLanguageNotInstalled(source_language.to_string()))?;
        let to = self
            .languages
            .get(target_language)
            .ok_or_else(|| TranslateError::TargetLanguageNotInstalled(target_language.to_string()))?;

        let handle = from
            .get_translation(to)
            .ok_or_else(|| TranslateError::NoDirectTranslation {
                from: from.code().to_string(),
                to: to.code().to_string(),
            })?;

        debug!(
            "Translating {} chars from {} to {}",
            text.len(),
            source_language,
            target_language
        );
        handle.translate(text).await.map_err(TranslateError::Backend)
    }
}
