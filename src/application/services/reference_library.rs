use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{DocumentLoader, ExtractionError};

/// A reference document bound to the target language that triggers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocument {
    pub language: String,
    pub name: String,
    pub path: PathBuf,
}

/// Reference text ready to be injected into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub text: Arc<str>,
}

struct ReferenceEntry {
    document: ReferenceDocument,
    text: OnceCell<Arc<str>>,
}

/// Lazily extracted reference material, keyed by lowercased target language.
///
/// Each language has its own slot. Concurrent first lookups for the same
/// language share one extraction; a successful extraction is kept for the
/// lifetime of the library and a failed one leaves the slot empty so a
/// later lookup tries again.
pub struct ReferenceLibrary {
    loader: Arc<dyn DocumentLoader>,
    entries: HashMap<String, ReferenceEntry>,
}

impl ReferenceLibrary {
    pub fn new(loader: Arc<dyn DocumentLoader>, documents: Vec<ReferenceDocument>) -> Self {
        let entries = documents
            .into_iter()
            .map(|document| {
                (
                    document.language.to_lowercase(),
                    ReferenceEntry {
                        document,
                        text: OnceCell::new(),
                    },
                )
            })
            .collect();

        Self { loader, entries }
    }

    pub fn is_trigger(&self, target_language: &str) -> bool {
        self.entries.contains_key(&target_language.to_lowercase())
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    #[tracing::instrument(skip(self))]
    pub async fn reference_for(&self, target_language: &str) -> Option<Reference> {
        let entry = self.entries.get(&target_language.to_lowercase())?;

        let loaded = entry
            .text
            .get_or_try_init(|| async {
                tracing::info!(
                    path = %entry.document.path.display(),
                    name = %entry.document.name,
                    "Loading reference document"
                );
                let text = self.loader.extract_text(&entry.document.path).await?;
                if text.is_empty() {
                    return Err(ExtractionError::NoTextFound(entry.document.name.clone()));
                }
                Ok::<_, ExtractionError>(Arc::<str>::from(text))
            })
            .await;

        match loaded {
            Ok(text) => Some(Reference {
                name: entry.document.name.clone(),
                text: Arc::clone(text),
            }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    name = %entry.document.name,
                    "Reference unavailable, continuing without it"
                );
                None
            }
        }
    }
}
