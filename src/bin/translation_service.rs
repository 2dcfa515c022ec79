use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ml_services::{
    config::Config,
    grpc, routes, server,
    state::TranslationState,
    telemetry,
    translation::{TranslationFactory, Translator},
    Transport,
};

/// Machine translation service
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

    // Every configured package must install before serving
    let backend = TranslationFactory::create_backend(&config.translation)?;
    let translator =
        Arc::new(Translator::initialize(backend.as_ref(), &config.translation.packages).await?);

    match args.transport {
        Transport::Rest => {
            let addr = server::socket_addr(&config.server.host, config.server.rest_port)?;
            let router = routes::create_translation_routes(TranslationState::new(translator));
            server::serve_rest(addr, router).await
        }
        Transport::Grpc => {
            let addr = server::socket_addr(&config.server.grpc_host, config.server.grpc_port)?;
            grpc::serve_translation(addr, config.server.grpc_workers, translator).await
        }
    }
}
