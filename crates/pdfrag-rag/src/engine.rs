//! Pipeline orchestrator: retrieve, assemble context, generate

use std::sync::Arc;

use pdfrag_core::{Document, GenerationBackend, Result, VectorIndex};

/// Number of passages retrieved per query
pub const DEFAULT_TOP_K: usize = 3;

/// Retrieval-augmented answer pipeline
///
/// Holds the injected vector index and generation backend; the index and
/// embedder are constructed once at startup and passed in by handle rather
/// than living in ambient process-wide state.
pub struct RagPipeline<V: VectorIndex, G: GenerationBackend> {
    index: Arc<V>,
    backend: Arc<G>,
    top_k: usize,
}

impl<V: VectorIndex, G: GenerationBackend> RagPipeline<V, G> {
    pub fn new(index: Arc<V>, backend: Arc<G>) -> Self {
        Self {
            index,
            backend,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Full replace-all ingestion of a freshly built corpus
    pub async fn ingest(&self, documents: &[Document]) -> Result<usize> {
        self.index.reset_and_store(documents).await
    }

    /// Answer a query: retrieve the top passages, join their texts with
    /// single spaces into one context blob, and forward question, context,
    /// and source attributions to the generation backend.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let retrieval = self.index.retrieve(query, self.top_k).await?;
        let context = retrieval.context();
        let sources = retrieval.sources();
        self.backend.generate(query, &context, &sources).await
    }
}
