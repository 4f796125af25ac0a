mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ENV_PREFIX, ENV_SEPARATOR, LlmSettings, OPENAI_API_KEY_VARIABLE, ReferenceDocumentSettings,
    ReferencesSettings, ServerSettings, Settings, TelemetrySettings,
};
