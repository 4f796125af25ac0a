use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentLoader, ExtractionError};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, String> {
        let mut doc =
            PdfDocument::open(path).map_err(|e| format!("failed to parse PDF: {e}"))?;

        let page_count = doc
            .page_count()
            .map_err(|e| format!("failed to read page count: {e}"))?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let text = doc
                .extract_text(page_index)
                .map_err(|e| format!("failed to extract page {}: {e}", page_index + 1))?;
            pages.push(text);
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentLoader for PdfAdapter {
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let owned_path: PathBuf = path.to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned_path)),
        )
        .await
        .map_err(|_| "PDF extraction timed out".to_string())
        .and_then(|joined| joined.map_err(|e| format!("task join error: {e}")))
        .and_then(|extracted| extracted)
        .map_err(|cause| {
            tracing::error!(error = %cause, "Error reading PDF file");
            ExtractionError::ReadFailed
        })?;

        let page_count = pages.len();
        let text = sanitize_extracted_text(&pages.join(" "));
        if text.is_empty() {
            tracing::warn!(page_count, "PDF contains no extractable text");
            return Err(ExtractionError::NoTextFound(path.display().to_string()));
        }

        tracing::info!(page_count, chars = text.len(), "PDF text extraction complete");

        Ok(text)
    }
}
