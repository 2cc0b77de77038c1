//! UI utilities for the interactive query loop

use colored::*;
use std::io::{self, Write};

use pdfrag_core::{Error, Result};

/// Display the startup banner
pub fn display_banner() {
    println!();
    println!("{}", "┌──────────────────────────────────────────────────┐".blue());
    println!("{}", "│                                                  │".blue());
    println!(
        "{}{}{}",
        "│  ".blue(),
        "pdfrag - local PDF question answering         ".blue().bold(),
        "  │".blue()
    );
    println!("{}", "│                                                  │".blue());
    println!("{}", "│  • Indexes the PDFs in your documents folder     │".blue());
    println!("{}", "│  • Answers questions from retrieved passages     │".blue());
    println!("{}", "│  • Powered by a local llama.cpp server           │".blue());
    println!("{}", "│                                                  │".blue());
    println!("{}", "└──────────────────────────────────────────────────┘".blue());
    println!();
    println!(
        "{}",
        "Tip: ask a question in natural language, or 'quit' to exit".dimmed()
    );
    println!();
}

/// Print example queries shown after ingestion
pub fn print_examples() {
    println!("{}", "Example queries you can try:".bold());
    println!("  1. What are the professional skills mentioned in the CVs?");
    println!("  2. List the educational qualifications found in the documents.");
    println!("  3. When did Apollo 11 land on the moon?");
}

/// Whether the input ends the interactive session
pub fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Prompt for and read one question; `None` on end of input
///
/// Reading happens on a blocking thread so the caller can race it against a
/// ctrl-c signal.
pub async fn read_question() -> Result<Option<String>> {
    print!("{} ", "rag>".green().bold());
    io::stdout().flush()?;

    let line = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(_) => None,
        }
    })
    .await
    .map_err(|e| Error::Other(e.to_string()))?;

    Ok(line)
}
