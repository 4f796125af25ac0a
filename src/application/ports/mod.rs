mod document_loader;
mod llm_client;
mod telemetry_sink;

pub use document_loader::{DocumentLoader, ExtractionError};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError};
pub use telemetry_sink::{TelemetryError, TelemetrySink};
