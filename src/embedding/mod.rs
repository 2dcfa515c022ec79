pub mod embedder;
pub mod factory;
pub mod interface;
#[cfg(feature = "local-models")]
pub mod local;
pub mod remote;

pub use embedder::{EmbedError, Embedder};
pub use factory::EmbeddingFactory;
pub use interface::{EmbeddingModel, EmbeddingRequest, EmbeddingResponse};
