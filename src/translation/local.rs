use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_bert::pipelines::translation::{Language, TranslationModel, TranslationModelBuilder};
use tracing::info;

use super::interface::{LanguagePackage, TranslationBackend, TranslationHandle};
use crate::worker::ModelWorker;

/// Directions covered by pretrained Marian models.
const MARIAN_PAIRS: &[(&str, &str)] = &[
    ("en", "es"),
    ("es", "en"),
    ("en", "fr"),
    ("fr", "en"),
    ("en", "it"),
    ("it", "en"),
    ("en", "pt"),
    ("pt", "en"),
    ("en", "de"),
    ("de", "en"),
    ("en", "ru"),
    ("ru", "en"),
    ("en", "zh"),
    ("zh", "en"),
    ("de", "fr"),
    ("fr", "de"),
    ("en", "nl"),
];

fn language_for(code: &str) -> Option<Language> {
    let language = match code {
        "en" => Language::English,
        "es" => Language::Spanish,
        "fr" => Language::French,
        "it" => Language::Italian,
        "pt" => Language::Portuguese,
        "de" => Language::German,
        "ru" => Language::Russian,
        "zh" => Language::ChineseMandarin,
        "nl" => Language::Dutch,
        _ => return None,
    };
    Some(language)
}

/// In-process translation with rust-bert; one model thread per installed direction.
#[derive(Default)]
pub struct LocalTranslationBackend;

struct LocalTranslation {
    worker: ModelWorker<String, String>,
}

#[async_trait]
impl TranslationHandle for LocalTranslation {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        self.worker.call(text.to_string()).await
    }
}

#[async_trait]
impl TranslationBackend for LocalTranslationBackend {
    fn name(&self) -> &str {
        "rust-bert"
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, anyhow::Error> {
        Ok(MARIAN_PAIRS
            .iter()
            .map(|(source, target)| LanguagePackage::new(*source, *target))
            .collect())
    }

    async fn install(
        &self,
        package: &LanguagePackage,
    ) -> Result<Arc<dyn TranslationHandle>, anyhow::Error> {
        let source = language_for(&package.source_language)
            .ok_or_else(|| anyhow!("unsupported language: {}", package.source_language))?;
        let target = language_for(&package.target_language)
            .ok_or_else(|| anyhow!("unsupported language: {}", package.target_language))?;

        info!("Loading Marian model for {}", package);
        let worker = ModelWorker::spawn(
            &format!("translate-{}-{}", package.source_language, package.target_language),
            move || -> Result<TranslationModel> {
                Ok(TranslationModelBuilder::new()
                    .with_source_languages(vec![source])
                    .with_target_languages(vec![target])
                    .create_model()?)
            },
            move |model: &TranslationModel, text: String| {
                let mut output = model.translate(&[text], source, target)?;
                output
                    .pop()
                    .ok_or_else(|| anyhow!("model returned no translation"))
            },
        )
        .await?;

        Ok(Arc::new(LocalTranslation { worker }))
    }
}
