mod init_tracing;
mod prompt_sanitizer;
mod trace_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use prompt_sanitizer::sanitize_prompt;
pub use trace_id::{TRACE_ID_HEADER, TRACE_ID_HEADER_ALIAS, trace_id_middleware};
pub use tracing_config::TracingConfig;
