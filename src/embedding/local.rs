use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use tracing::info;

use super::interface::EmbeddingModel;
use crate::worker::ModelWorker;

fn model_type_for(name: &str) -> Option<SentenceEmbeddingsModelType> {
    let short = name.trim_start_matches("sentence-transformers/");
    let model_type = match short {
        "all-MiniLM-L6-v2" => SentenceEmbeddingsModelType::AllMiniLmL6V2,
        "all-MiniLM-L12-v2" => SentenceEmbeddingsModelType::AllMiniLmL12V2,
        "all-distilroberta-v1" => SentenceEmbeddingsModelType::AllDistilrobertaV1,
        "paraphrase-albert-small-v2" => SentenceEmbeddingsModelType::ParaphraseAlbertSmallV2,
        "distiluse-base-multilingual-cased" => {
            SentenceEmbeddingsModelType::DistiluseBaseMultilingualCased
        }
        _ => return None,
    };
    Some(model_type)
}

/// Sentence embeddings computed in-process by rust-bert.
pub struct LocalEmbeddingModel {
    name: String,
    worker: ModelWorker<String, Vec<f32>>,
}

impl LocalEmbeddingModel {
    /// Downloads (on first use) and loads the pretrained model.
    pub async fn load(name: &str) -> Result<Self> {
        let model_type = model_type_for(name)
            .ok_or_else(|| anyhow!("no pretrained rust-bert model for {}", name))?;

        info!("Loading sentence embedding model {}", name);
        let worker = ModelWorker::spawn(
            "embedding-model",
            move || -> Result<SentenceEmbeddingsModel> {
                Ok(SentenceEmbeddingsBuilder::remote(model_type).create_model()?)
            },
            |model: &SentenceEmbeddingsModel, text: String| {
                let mut output = model.encode(&[text])?;
                output.pop().ok_or_else(|| anyhow!("model returned no embedding"))
            },
        )
        .await?;

        Ok(Self {
            name: name.to_string(),
            worker,
        })
    }
}

#[async_trait]
impl EmbeddingModel for LocalEmbeddingModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.worker.call(text.to_string()).await
    }
}
