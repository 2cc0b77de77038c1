use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

// Import from our modular crates
use pdfrag_cli::{display_banner, is_exit_command, print_examples, read_question};
use pdfrag_llama::{LlamaClient, LlamaConfig};
use pdfrag_rag::{CorpusBuilder, HashEmbedder, PdfTextExtractor, PersistentVectorIndex, RagPipeline};

/// Collection name under which the index is persisted
const COLLECTION_NAME: &str = "rag_collection";

#[derive(Parser)]
#[command(name = "pdfrag")]
#[command(about = "Local retrieval-augmented question answering over PDF documents", long_about = None)]
struct Cli {
    /// Answer a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Directory scanned (non-recursively) for *.pdf input
    #[arg(long, default_value = "documents")]
    docs_dir: PathBuf,

    /// Directory holding the persistent vector index
    #[arg(long, default_value = "rag_index")]
    index_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    println!("Starting RAG application...");

    let client = LlamaClient::new(LlamaConfig::from_env())?;
    if client.discover_endpoint().await.is_none() {
        println!();
        println!("{}", "Warning: llama.cpp server is not running!".yellow());
        println!("Please start the server using llama.cpp with the following command:");
        println!("./server -m <path-to-your-model> -c 2048");
        println!();
        println!("Continuing with document processing...");
        println!();
    }

    println!("Processing documents...");
    let corpus = CorpusBuilder::new(&cli.docs_dir, PdfTextExtractor::new());
    let documents = corpus.build();

    let index = PersistentVectorIndex::open(&cli.index_dir, COLLECTION_NAME, HashEmbedder::new())?;
    let pipeline = RagPipeline::new(Arc::new(index), Arc::new(client));

    match pipeline.ingest(&documents).await {
        Ok(0) => println!("No valid documents to store."),
        Ok(stored) => println!("Successfully stored {} documents in the index.", stored),
        Err(e) => println!("{} Indexing failed: {}", "Error:".red(), e),
    }

    // One-shot mode
    if let Some(question) = cli.question {
        print_answer(pipeline.answer(&question).await);
        return Ok(());
    }

    // Interactive mode
    display_banner();
    println!("{}", "System is ready for queries!".green());
    print_examples();
    println!();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nExiting...");
                break;
            }
            line = read_question() => {
                let Some(input) = line? else {
                    println!("\nExiting...");
                    break;
                };

                if input.is_empty() {
                    continue;
                }

                if is_exit_command(&input) {
                    println!("{}", "Goodbye!".green());
                    break;
                }

                println!("\nProcessing query...");
                print_answer(pipeline.answer(&input).await);
                println!();
            }
        }
    }

    Ok(())
}

fn print_answer(answer: pdfrag_core::Result<String>) {
    match answer {
        Ok(text) => println!("\n{} {}", "Response:".bold(), text),
        Err(e) => {
            println!("\n{} {}", "Error:".red(), e);
            println!("Please make sure the llama.cpp server is running and try again.");
        }
    }
}
