//! Document type shared across the ingestion pipeline

use serde::{Deserialize, Serialize};

/// A logical unit of retrievable knowledge
///
/// Documents are built transiently on every ingestion run; only their text
/// and source label are persisted inside the vector index, under an id the
/// index assigns at storage time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Normalized plain-text content
    pub text: String,
    /// Human-readable provenance label (file name or a category tag)
    pub source: String,
}

impl Document {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    /// Whether the document carries any indexable text
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text() {
        assert!(Document::new("hello", "a.pdf").has_text());
        assert!(!Document::new("", "a.pdf").has_text());
        assert!(!Document::new("  \n\t ", "a.pdf").has_text());
    }
}
