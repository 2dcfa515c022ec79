use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ml_services::{
    config::Config,
    gateway::{create_gateway_routes, GatewayService},
    server,
    state::GatewayState,
    telemetry,
};

/// Translation gateway with a semantic translation cache
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    info!(
        "Gateway upstreams: embedding={}, translation={}",
        config.gateway.embedding_url, config.gateway.translate_url
    );

    let gateway = Arc::new(GatewayService::from_config(&config.gateway).await?);

    let addr = server::socket_addr(&config.server.host, config.gateway.port)?;
    server::serve_rest(addr, create_gateway_routes(GatewayState::new(gateway))).await
}
