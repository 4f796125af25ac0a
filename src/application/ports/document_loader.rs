use std::path::Path;

use async_trait::async_trait;

/// Turns a reference document on disk into flat, whitespace-normalised text.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Deliberately opaque: adapters log the underlying cause themselves.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to read PDF content")]
    ReadFailed,
    #[error("no text found in {0}")]
    NoTextFound(String),
}
