//! gRPC front-ends of the embedding and translation services.

pub mod embed;
pub mod translate;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tonic::transport::Server;
use tower::limit::GlobalConcurrencyLimitLayer;
use tracing::info;

use crate::embedding::Embedder;
use crate::server::shutdown_signal;
use crate::translation::Translator;

pub use embed::EmbedderService;
pub use translate::TranslatorService;

/// Serves `embed.Embedder` with at most `workers` requests in flight.
pub async fn serve_embedding(addr: SocketAddr, workers: usize, embedder: Arc<Embedder>) -> Result<()> {
    info!("Starting gRPC embedding server on {} ({} workers)", addr, workers);

    Server::builder()
        .layer(GlobalConcurrencyLimitLayer::new(workers))
        .add_service(EmbedderService::new(embedder).into_server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;
    Ok(())
}

/// Serves `translate.Translator` with at most `workers` requests in flight.
pub async fn serve_translation(
    addr: SocketAddr,
    workers: usize,
    translator: Arc<Translator>,
) -> Result<()> {
    info!("Starting gRPC translation server on {} ({} workers)", addr, workers);

    Server::builder()
        .layer(GlobalConcurrencyLimitLayer::new(workers))
        .add_service(TranslatorService::new(translator).into_server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;
    Ok(())
}
