//! PDF text extraction

use std::path::Path;

use lopdf::Document as PdfDocument;

use pdfrag_core::{Error, Result, TextExtractor};

/// Extracts normalized plain text from PDF files
///
/// Extraction is tolerant by design: a file that cannot be parsed at all
/// yields an empty string (with a diagnostic on stderr), and a page that
/// yields no text (a scanned image without an OCR layer, for example) is
/// replaced by a placeholder marker instead of failing the whole document.
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Normalize one page of extracted text: collapse double spaces into
    /// one, strip leading/trailing whitespace from every line, keep the
    /// line breaks within the page.
    fn normalize_page(text: &str) -> String {
        let text = text.replace("  ", " ");
        text.lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extract_pages(path: &Path) -> Result<String> {
        let doc = PdfDocument::load(path).map_err(|e| Error::Extraction(e.to_string()))?;

        let mut blocks = Vec::new();
        for (&page_num, _) in doc.get_pages().iter() {
            let page_text = doc
                .extract_text(&[page_num])
                .unwrap_or_default();
            if page_text.trim().is_empty() {
                blocks.push(format!("[No text found on page {}]", page_num));
            } else {
                blocks.push(Self::normalize_page(page_text.trim()));
            }
        }

        // Page blocks are joined with single spaces across the document
        Ok(blocks.join(" "))
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> String {
        match Self::extract_pages(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error extracting text from {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pdf::write_pdf;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_collapses_double_spaces() {
        assert_eq!(PdfTextExtractor::normalize_page("a  b"), "a b");
        // A run of three spaces collapses one pair and leaves two
        assert_eq!(PdfTextExtractor::normalize_page("a   b"), "a  b");
    }

    #[test]
    fn test_normalize_trims_lines_and_keeps_breaks() {
        assert_eq!(
            PdfTextExtractor::normalize_page(" hello \n\tworld  "),
            "hello\nworld"
        );
    }

    #[test]
    fn test_extracts_text_from_single_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cv.pdf");
        write_pdf(&path, &[Some("Rust engineer with ten years experience")]);

        let text = PdfTextExtractor::new().extract(&path);
        assert!(text.contains("Rust engineer"));
    }

    #[test]
    fn test_blank_page_yields_placeholder_not_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.pdf");
        write_pdf(&path, &[Some("Readable page"), None]);

        let text = PdfTextExtractor::new().extract(&path);
        assert!(text.contains("Readable page"));
        assert!(text.contains("[No text found on page 2]"));
    }

    #[test]
    fn test_unparseable_file_yields_empty_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert_eq!(PdfTextExtractor::new().extract(&path), "");
    }

    #[test]
    fn test_missing_file_yields_empty_string() {
        assert_eq!(
            PdfTextExtractor::new().extract(std::path::Path::new("does/not/exist.pdf")),
            ""
        );
    }
}
