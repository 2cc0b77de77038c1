//! Embedding function trait

/// A fixed embedding function mapping text to a vector of a fixed dimension
///
/// Implementations must be deterministic: the same text always yields the
/// same vector, across calls and across process restarts. Queries and stored
/// documents must be embedded by the same implementation for retrieval to be
/// meaningful.
pub trait Embedder: Send + Sync {
    /// The length of every vector produced by [`embed`](Self::embed)
    fn dimension(&self) -> usize;

    /// Embed a piece of text
    fn embed(&self, text: &str) -> Vec<f32>;
}
