//! llama.cpp integration for pdfrag
//!
//! This crate provides the llama.cpp implementation of the
//! GenerationBackend trait, including endpoint discovery across the native
//! and OpenAI-compatible completion routes.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::{Endpoint, EndpointKind, LlamaClient};
pub use config::{DEFAULT_BASE_URL, LlamaConfig};

// Re-export core types for convenience
pub use pdfrag_core::{Error, GenerationBackend, Result};
