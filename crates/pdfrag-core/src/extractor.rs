//! Text extraction trait

use std::path::Path;

/// Extracts normalized plain text from a source document
///
/// Extraction never fails to the caller: unreadable input yields an empty
/// string (with a diagnostic emitted locally) so a single bad file cannot
/// abort an ingestion run.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> String;
}
