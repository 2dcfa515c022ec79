use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ml_services::{
    config::Config,
    embedding::{Embedder, EmbeddingFactory},
    grpc, routes, server,
    state::EmbeddingState,
    telemetry, Transport,
};

/// Text embedding service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Front-end to expose
    #[arg(short, long, value_enum, default_value_t = Transport::Rest)]
    transport: Transport,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    // The model is loaded before any listener is bound
    let model = EmbeddingFactory::create_model(&config.embedding).await?;
    let embedder = Arc::new(Embedder::load(model).await?);

    match args.transport {
        Transport::Rest => {
            let addr = server::socket_addr(&config.server.host, config.server.rest_port)?;
            let router = routes::create_embedding_routes(EmbeddingState::new(embedder));
            server::serve_rest(addr, router).await
        }
        Transport::Grpc => {
            let addr = server::socket_addr(&config.server.grpc_host, config.server.grpc_port)?;
            grpc::serve_embedding(addr, config.server.grpc_workers, embedder).await
        }
    }
}
