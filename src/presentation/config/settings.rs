use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{CompletionSettings, ReferenceDocument};
use crate::infrastructure::llm::DEFAULT_BASE_URL;
use crate::infrastructure::telemetry::TelemetryEndpoint;

use super::Environment;

pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";
pub const OPENAI_API_KEY_VARIABLE: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub telemetry: TelemetrySettings,
    pub references: ReferencesSettings,
}

impl Settings {
    /// Layers `appsettings.{env}.toml` (optional) under `APP__*` variables.
    ///
    /// An empty `llm.api_key` falls back to `OPENAI_API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.llm.api_key.is_empty() {
            settings.llm.api_key = std::env::var(OPENAI_API_KEY_VARIABLE).unwrap_or_default();
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub temperature: f32,
    pub provider: String,
}

impl LlmSettings {
    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.chat_model.clone(),
            temperature: self.temperature,
            provider: self.provider.clone(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        let completion = CompletionSettings::default();
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: completion.model,
            temperature: completion.temperature,
            provider: completion.provider,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub repository_id: String,
    pub queue_capacity: usize,
}

impl TelemetrySettings {
    /// `None` when no endpoint is configured, meaning telemetry stays local.
    pub fn endpoint(&self) -> Option<TelemetryEndpoint> {
        self.endpoint
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| TelemetryEndpoint {
                base_url: url.clone(),
                repository_id: self.repository_id.clone(),
                api_key: self.api_key.clone(),
            })
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            repository_id: "lingua-teacher".to_string(),
            queue_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferencesSettings {
    pub documents: Vec<ReferenceDocumentSettings>,
}

impl ReferencesSettings {
    pub fn documents(&self) -> Vec<ReferenceDocument> {
        self.documents
            .iter()
            .map(|d| ReferenceDocument {
                language: d.language.clone(),
                name: d.name.clone(),
                path: d.path.clone(),
            })
            .collect()
    }
}

impl Default for ReferencesSettings {
    fn default() -> Self {
        Self {
            documents: vec![ReferenceDocumentSettings {
                language: "klingon".to_string(),
                name: "klingon-dictionary".to_string(),
                path: PathBuf::from("data").join("Franchise - The Klingon Dictionary.pdf"),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceDocumentSettings {
    pub language: String,
    pub name: String,
    pub path: PathBuf,
}
