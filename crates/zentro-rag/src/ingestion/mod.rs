//! Document ingestion: text extraction and chunking

mod chunker;
mod extractor;

pub use chunker::{chunk_text, DEFAULT_MAX_CHARS};
pub use extractor::{FileKind, TextExtractor};
