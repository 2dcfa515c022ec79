use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gateway::DEFAULT_CACHE_CAPACITY;
use crate::translation::LanguagePackage;

/// Basename of the config file picked up when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "config/default";

const ENV_PREFIX: &str = "ML_SERVICES";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub translation: TranslationConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub rest_port: u16,
    pub grpc_host: String,
    pub grpc_port: u16,
    /// Upper bound on concurrently running RPC handlers.
    pub grpc_workers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Inference server reached over HTTP.
    Remote,
    /// In-process inference, requires the `local-models` feature.
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: BackendKind,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub backend: BackendKind,
    pub base_url: String,
    pub api_key: Option<String>,
    pub packages: Vec<LanguagePackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub port: u16,
    pub embedding_url: String,
    pub translate_url: String,
    /// Postgres with pgvector; the cache stays in memory when unset.
    pub database_url: Option<String>,
    pub request_timeout_secs: u64,
    /// Largest cosine distance at which a cached sentence is reused.
    pub max_distance: f32,
    /// Entries kept by the in-memory cache before the oldest is evicted.
    pub cache_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            rest_port: 8000,
            grpc_host: "::".to_string(),
            grpc_port: 50051,
            grpc_workers: 10,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Remote,
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            base_url: "http://localhost:8081".to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Remote,
            base_url: "http://localhost:5000".to_string(),
            api_key: None,
            packages: default_packages(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            embedding_url: "http://localhost:8000/embed".to_string(),
            translate_url: "http://localhost:8001/translate".to_string(),
            database_url: None,
            request_timeout_secs: 30,
            max_distance: 0.1,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

fn default_packages() -> Vec<LanguagePackage> {
    [
        ("en", "es"),
        ("es", "en"),
        ("fr", "en"),
        ("en", "fr"),
        ("de", "en"),
        ("en", "de"),
        ("en", "zh"),
    ]
    .into_iter()
    .map(|(source, target)| LanguagePackage::new(source, target))
    .collect()
}

impl Config {
    /// Layers defaults, the config file and `ML_SERVICES__*` environment
    /// variables, in that order.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.gateway.apply_env_overrides()?;
        Ok(config)
    }
}

impl GatewayConfig {
    /// Honors the plain variable names the gateway was historically deployed with.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("EMBEDDING_URL") {
            self.embedding_url = url;
        }
        if let Ok(url) = std::env::var("TRANSLATE_URL") {
            self.translate_url = url;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("invalid PORT: {}", port))?;
        }
        Ok(())
    }
}
