//! Deterministic hashing embedder

use pdfrag_core::Embedder;

/// Default embedding dimension
pub const DEFAULT_DIMENSION: usize = 384;

/// Signed feature-hashing embedder
///
/// Tokens are lowercased alphanumeric runs; each token is hashed with md5
/// into a bucket and a sign, accumulated by term frequency, and the vector
/// is L2-normalized. The mapping is fixed, so the same text embeds to the
/// same vector across runs and across processes, which is what lets the
/// persisted index answer queries embedded in a later session.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::with_dimension(DEFAULT_DIMENSION)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn tokens(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in Self::tokens(text) {
            let digest = md5::compute(token.as_bytes()).0;
            let bucket =
                u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]) as usize
                    % self.dimension;
            let sign = if digest[4] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}
