use std::sync::Arc;

use crate::embedding::Embedder;
use crate::gateway::GatewayService;
use crate::translation::Translator;

/// Handler state of the embedding REST front-end.
#[derive(Clone)]
pub struct EmbeddingState {
    pub embedder: Arc<Embedder>,
}

/// Handler state of the translation REST front-end.
#[derive(Clone)]
pub struct TranslationState {
    pub translator: Arc<Translator>,
}

/// Handler state of the translation gateway.
#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<GatewayService>,
}

impl EmbeddingState {
    pub fn new(embedder: Arc<Embedder>) -> Self {
        Self { embedder }
    }
}

impl TranslationState {
    pub fn new(translator: Arc<Translator>) -> Self {
        Self { translator }
    }
}

impl GatewayState {
    pub fn new(gateway: Arc<GatewayService>) -> Self {
        Self { gateway }
    }
}
