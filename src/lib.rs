//! Text embedding and machine translation served over REST and gRPC.
//!
//! The model work itself is delegated to an [`embedding::EmbeddingModel`] or a
//! [`translation::TranslationBackend`]; this crate owns the service contracts
//! around them.

pub mod config;
pub mod embedding;
pub mod error;
pub mod gateway;
pub mod grpc;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod translation;
#[cfg(any(feature = "local-models", test))]
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use server::Transport;

/// Code generated from `proto/`
pub mod proto {
    pub mod embed {
        tonic::include_proto!("embed");
    }

    pub mod translate {
        tonic::include_proto!("translate");
    }
}
