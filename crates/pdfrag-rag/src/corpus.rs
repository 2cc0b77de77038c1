//! Corpus assembly: extracted PDF documents plus built-in reference documents

use std::fs;
use std::path::{Path, PathBuf};

use pdfrag_core::{Document, TextExtractor};

/// Source tag shared by the built-in reference documents
pub const REFERENCE_SOURCE: &str = "space_facts";

/// Assembles the full indexable document set for an ingestion run
///
/// File-backed documents come from a flat, non-recursive scan of the
/// configured directory; a fixed set of reference documents is appended
/// unconditionally, so the corpus is never empty even with zero input files.
pub struct CorpusBuilder<E: TextExtractor> {
    docs_dir: PathBuf,
    extractor: E,
}

impl<E: TextExtractor> CorpusBuilder<E> {
    pub fn new(docs_dir: impl Into<PathBuf>, extractor: E) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            extractor,
        }
    }

    /// Build the corpus: one document per PDF with extractable text, plus
    /// the reference documents
    pub fn build(&self) -> Vec<Document> {
        let mut documents = Vec::new();

        for path in self.pdf_files() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            println!("Processing: {}", name);

            let text = self.extractor.extract(&path);
            if text.trim().is_empty() {
                continue;
            }
            documents.push(Document::new(text, name));
        }

        documents.extend(reference_documents());
        documents
    }

    /// PDF files in the documents directory, sorted by name for a
    /// deterministic ingestion order. A missing directory is an empty file
    /// list, not an error.
    fn pdf_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.docs_dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_pdf_extension(path))
            .collect();
        files.sort();
        files
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// The built-in general knowledge documents appended to every corpus
fn reference_documents() -> Vec<Document> {
    [
        "The Apollo 11 mission landed humans on the moon for the first time on July 20, 1969.",
        "SpaceX's Falcon 9 is a reusable rocket designed to reduce the cost of space travel.",
        "The International Space Station orbits Earth at an altitude of about 400 kilometers.",
        "Mars Rover Perseverance searches for signs of ancient life on the Martian surface.",
    ]
    .into_iter()
    .map(|text| Document::new(text, REFERENCE_SOURCE))
    .collect()
}
