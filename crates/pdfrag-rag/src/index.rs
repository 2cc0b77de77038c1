//! Persistent embedding-backed vector index

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pdfrag_core::{
    Document, Embedder, Error, Result, Retrieval, RetrievedDocument, VectorIndex,
};

/// One stored entry: id is unique and assigned at storage time, the
/// embedding is computed from the text by the configured embedder
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: String,
    text: String,
    embedding: Vec<f32>,
    source: String,
}

/// On-disk snapshot of the whole collection
#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    collection: String,
    last_updated: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// Vector index persisted as a JSON snapshot under a configured directory,
/// keyed by collection name
///
/// Indexing is full replace-all: every `reset_and_store` clears the current
/// entries (including entries reloaded from disk) before repopulating, so
/// re-running ingestion never leaves stale or duplicate entries behind.
pub struct PersistentVectorIndex<E: Embedder> {
    embedder: E,
    collection: String,
    snapshot_path: PathBuf,
    entries: RwLock<Vec<IndexEntry>>,
}

impl<E: Embedder> PersistentVectorIndex<E> {
    /// Open (or create) the index stored under `dir` for `collection`
    ///
    /// A corrupt or unreadable snapshot degrades to an empty index rather
    /// than failing the run; the next ingestion rewrites it.
    pub fn open(dir: impl AsRef<Path>, collection: &str, embedder: E) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let snapshot_path = dir.join(format!("{}.json", collection));

        let entries = if snapshot_path.exists() {
            let content = fs::read_to_string(&snapshot_path)?;
            serde_json::from_str::<IndexSnapshot>(&content)
                .map(|snapshot| snapshot.entries)
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            embedder,
            collection: collection.to_string(),
            snapshot_path,
            entries: RwLock::new(entries),
        })
    }

    fn save(&self, entries: &[IndexEntry]) -> Result<()> {
        let snapshot = IndexSnapshot {
            collection: self.collection.clone(),
            last_updated: Utc::now(),
            entries: entries.to_vec(),
        };
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(&self.snapshot_path, content)?;
        Ok(())
    }
}

pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[async_trait]
impl<E: Embedder + 'static> VectorIndex for PersistentVectorIndex<E> {
    async fn reset_and_store(&self, documents: &[Document]) -> Result<usize> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;

        // Full replace: drop everything before storing the new run
        entries.clear();

        for document in documents.iter().filter(|d| d.has_text()) {
            entries.push(IndexEntry {
                id: Uuid::new_v4().to_string(),
                embedding: self.embedder.embed(&document.text),
                text: document.text.clone(),
                source: document.source.clone(),
            });
        }

        self.save(&entries)?;
        Ok(entries.len())
    }

    async fn retrieve(&self, query: &str, limit: usize) -> Result<Retrieval> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;

        if entries.is_empty() || limit == 0 {
            return Ok(Retrieval::default());
        }

        let query_embedding = self.embedder.embed(query);

        let mut scored: Vec<(usize, f32)> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(&query_embedding, &entry.embedding)))
            .collect();

        // Score descending, insertion order as the deterministic tie-break
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(limit);

        let documents = scored
            .into_iter()
            .map(|(i, score)| RetrievedDocument {
                text: entries[i].text.clone(),
                source: entries[i].source.clone(),
                score,
            })
            .collect();

        Ok(Retrieval { documents })
    }

    async fn count(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::VectorIndex(format!("Lock error: {}", e)))?;
        Ok(entries.len())
    }
}
