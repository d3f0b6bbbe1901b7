//! Vector storage and similarity search

mod store;

pub use store::{ChunkMetadata, ChunkRecord, SearchHit, VectorStore};
