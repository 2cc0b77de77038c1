//! Interactive terminal surface for pdfrag

mod ui;

pub use ui::{display_banner, is_exit_command, print_examples, read_question};

// Re-export core types
pub use pdfrag_core::{Error, Result};
