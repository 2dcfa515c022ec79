use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::proto::translate::translator_server::{Translator as TranslatorRpc, TranslatorServer};
use crate::proto::translate::{TranslationRequest, TranslationResponse};
use crate::translation::{TranslateError, Translator};

pub struct TranslatorService {
    translator: Arc<Translator>,
}

impl TranslatorService {
    pub fn new(translator: Arc<Translator>) -> Self {
        Self { translator }
    }

    pub fn into_server(self) -> TranslatorServer<Self> {
        TranslatorServer::new(self)
    }
}

#[tonic::async_trait]
impl TranslatorRpc for TranslatorService {
    async fn translate(
        &self,
        request: Request<TranslationRequest>,
    ) -> Result<Response<TranslationResponse>, Status> {
        let req = request.into_inner();

        tracing::info!(
            "Translating text (length: {}) from {} to {}",
            req.text.len(),
            req.source_language,
            req.target_language
        );

        self.translator
            .translate(&req.text, &req.source_language, &req.target_language)
            .await
            .map(|translation| Response::new(TranslationResponse { translation }))
            .map_err(status_for)
    }
}

/// Unknown languages are the caller's problem; everything else is ours.
fn status_for(e: TranslateError) -> Status {
    if e.is_client_error() {
        tracing::warn!("Rejected translation request: {}", e);
        Status::invalid_argument(e.to_string())
    } else {
        tracing::error!("Translation failed: {}", e);
        Status::internal(format!("Translation failed: {}", e))
    }
}
