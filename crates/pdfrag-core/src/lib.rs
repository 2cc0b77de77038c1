//! Core traits and types for the pdfrag retrieval pipeline
//!
//! This crate defines the seams between the pipeline's collaborators: text
//! extraction, embedding, the vector index, and the generation backend. The
//! concrete implementations live in the sibling crates; keeping the traits
//! here makes every stage swappable and test-friendly.

pub mod document;
pub mod embedding;
pub mod error;
pub mod extractor;
pub mod generation;
pub mod vector_index;

pub use document::Document;
pub use embedding::Embedder;
pub use error::{Error, Result};
pub use extractor::TextExtractor;
pub use generation::GenerationBackend;
pub use vector_index::{Retrieval, RetrievedDocument, VectorIndex};
