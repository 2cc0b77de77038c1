//! Retrieval pipeline for pdfrag
//!
//! This crate provides the concrete ingestion and retrieval stages: PDF text
//! extraction, corpus assembly, a deterministic hashing embedder, a
//! persistent vector index, and the pipeline orchestrator tying retrieval to
//! a generation backend.

mod corpus;
mod embedding;
mod engine;
mod extractor;
mod index;

#[cfg(test)]
mod test_pdf;

pub use corpus::{CorpusBuilder, REFERENCE_SOURCE};
pub use embedding::HashEmbedder;
pub use engine::{DEFAULT_TOP_K, RagPipeline};
pub use extractor::PdfTextExtractor;
pub use index::PersistentVectorIndex;

// Re-export core types for convenience
pub use pdfrag_core::{
    Document, Embedder, Error, GenerationBackend, Result, Retrieval, RetrievedDocument,
    TextExtractor, VectorIndex,
};
