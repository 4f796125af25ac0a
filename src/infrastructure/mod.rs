pub mod llm;
pub mod observability;
pub mod telemetry;
pub mod text_processing;
