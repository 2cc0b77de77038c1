//! Vector index trait and retrieval types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Document, Result};

/// A single retrieved document with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Ordered retrieval result, most similar first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrieval {
    pub documents: Vec<RetrievedDocument>,
}

impl Retrieval {
    /// Join the retrieved texts with single spaces into one context blob
    pub fn context(&self) -> String {
        self.documents
            .iter()
            .map(|doc| doc.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Source labels aligned with the retrieved texts
    pub fn sources(&self) -> Vec<String> {
        self.documents.iter().map(|doc| doc.source.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Trait for persistent embedding-backed document stores
///
/// Indexing is full replace-all: `reset_and_store` clears every existing
/// entry before repopulating, so re-running ingestion never duplicates
/// entries even on an index reloaded from durable storage.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Clear the index, then store every document with non-empty trimmed
    /// text under a fresh unique id. Returns the number of documents stored;
    /// an all-empty input leaves the index cleared and returns 0.
    async fn reset_and_store(&self, documents: &[Document]) -> Result<usize>;

    /// Return the top-`limit` stored documents most similar to `query`,
    /// most similar first. Fewer than `limit` stored documents returns all
    /// available matches.
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Retrieval>;

    /// Total number of stored entries
    async fn count(&self) -> Result<usize>;
}
