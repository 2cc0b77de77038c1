//! Generation backend trait

use async_trait::async_trait;

use crate::Result;

/// Trait for language-model generation backends
///
/// The backend receives the user's question together with the retrieved
/// context and source attributions and returns the generated answer text.
/// Failure classes are carried in [`Error`](crate::Error) variants rather
/// than untyped strings so the interactive surface can report them without
/// terminating.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, question: &str, context: &str, sources: &[String]) -> Result<String>;
}
