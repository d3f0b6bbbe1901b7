//! Persistent vector collection with cosine similarity search

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A stored chunk: text, embedding, and owning-document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Unique id, `{document_id}_{chunk_index}`
    pub id: String,
    /// Owning document
    pub document_id: Uuid,
    /// Original upload filename
    pub filename: String,
    /// 0-based position within the document
    pub chunk_index: u32,
    /// Raw chunk text
    pub text: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
}

impl ChunkRecord {
    /// Metadata view of this record
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            document_id: self.document_id,
            filename: self.filename.clone(),
            chunk_index: self.chunk_index,
        }
    }
}

/// Per-record metadata, without text or embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub document_id: Uuid,
    pub filename: String,
    pub chunk_index: u32,
}

/// A similarity search hit
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    pub similarity: f32,
}

/// On-disk chunk collection behind a single lock
///
/// The whole collection persists as one JSON file named after the collection.
/// `clear` swaps in a fresh empty collection and rewrites the file; there is
/// no per-document deletion.
pub struct VectorStore {
    path: PathBuf,
    records: RwLock<Vec<ChunkRecord>>,
}

impl VectorStore {
    /// Open the collection under `data_dir`, creating it when absent.
    pub fn open(data_dir: &Path, collection: &str) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(format!("{}.json", collection));

        let records = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Failed to parse collection file, starting empty: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Append records and persist. IDs must be unique within the store.
    pub fn add(&self, new_records: Vec<ChunkRecord>) -> Result<()> {
        let mut records = self.records.write();
        records.extend(new_records);
        self.persist(&records)
    }

    /// Up to `k` nearest records by cosine similarity.
    ///
    /// An empty store, or a `document_id` filter matching nothing, yields an
    /// empty result rather than an error.
    pub fn query(&self, embedding: &[f32], k: usize, document_id: Option<Uuid>) -> Vec<SearchHit> {
        let records = self.records.read();

        let mut hits: Vec<SearchHit> = records
            .iter()
            .filter(|record| document_id.map_or(true, |id| record.document_id == id))
            .map(|record| SearchHit {
                id: record.id.clone(),
                text: record.text.clone(),
                similarity: cosine_similarity(&record.embedding, embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }

    /// Metadata of every stored record, in insertion order
    pub fn list_metadata(&self) -> Vec<ChunkMetadata> {
        self.records
            .read()
            .iter()
            .map(ChunkRecord::metadata)
            .collect()
    }

    /// Drop every record and rewrite the collection file. Irreversible.
    pub fn clear(&self) -> Result<()> {
        let mut records = self.records.write();
        *records = Vec::new();
        self.persist(&records)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, records: &[ChunkRecord]) -> Result<()> {
        let content = serde_json::to_string(records)?;
        fs::write(&self.path, content)
            .map_err(|e| Error::vector_db(format!("Failed to persist collection: {}", e)))
    }
}

/// Cosine similarity between two vectors; 0.0 when either has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doc: Uuid, index: u32, filename: &str, embedding: Vec<f32>) -> ChunkRecord {
        ChunkRecord {
            id: format!("{}_{}", doc, index),
            document_id: doc,
            filename: filename.to_string(),
            chunk_index: index,
            text: format!("chunk {}", index),
            embedding,
        }
    }

    fn open_store(dir: &Path) -> VectorStore {
        VectorStore::open(dir, "zentro_docs").unwrap()
    }

    #[test]
    fn query_ranks_by_cosine_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let doc = Uuid::new_v4();

        store
            .add(vec![
                record(doc, 0, "a.txt", vec![1.0, 0.0]),
                record(doc, 1, "a.txt", vec![0.0, 1.0]),
                record(doc, 2, "a.txt", vec![0.9, 0.1]),
            ])
            .unwrap();

        let hits = store.query(&[1.0, 0.0], 2, None);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, format!("{}_0", doc));
        assert_eq!(hits[1].id, format!("{}_2", doc));
    }

    #[test]
    fn query_respects_document_filter() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let doc_a = Uuid::new_v4();
        let doc_b = Uuid::new_v4();

        store
            .add(vec![
                record(doc_a, 0, "a.txt", vec![1.0, 0.0]),
                record(doc_b, 0, "b.txt", vec![1.0, 0.0]),
            ])
            .unwrap();

        let hits = store.query(&[1.0, 0.0], 2, Some(doc_b));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, format!("{}_0", doc_b));

        let none = store.query(&[1.0, 0.0], 2, Some(Uuid::new_v4()));
        assert!(none.is_empty());
    }

    #[test]
    fn empty_store_query_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        assert!(store.query(&[1.0, 0.0], 2, None).is_empty());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Uuid::new_v4();

        {
            let store = open_store(dir.path());
            store
                .add(vec![record(doc, 0, "a.txt", vec![0.5, 0.5])])
                .unwrap();
        }

        let reopened = open_store(dir.path());
        assert_eq!(reopened.len(), 1);
        let metadata = reopened.list_metadata();
        assert_eq!(metadata[0].document_id, doc);
        assert_eq!(metadata[0].filename, "a.txt");
    }

    #[test]
    fn clear_empties_store_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Uuid::new_v4();

        let store = open_store(dir.path());
        store
            .add(vec![record(doc, 0, "a.txt", vec![1.0, 0.0])])
            .unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(store.query(&[1.0, 0.0], 2, None).is_empty());

        let reopened = open_store(dir.path());
        assert!(reopened.is_empty());
    }

    #[test]
    fn metadata_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let doc = Uuid::new_v4();

        store
            .add(vec![
                record(doc, 0, "a.txt", vec![1.0]),
                record(doc, 1, "a.txt", vec![1.0]),
                record(doc, 2, "a.txt", vec![1.0]),
            ])
            .unwrap();

        let indices: Vec<u32> = store.list_metadata().iter().map(|m| m.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn zero_vectors_have_zero_similarity() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
