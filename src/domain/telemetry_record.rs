use serde::Serialize;

use super::{ChatCompletion, ChatMessage, CompletionChoice, TokenUsage};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParameters {
    pub temperature: f32,
}

/// A completion request as announced to telemetry before the provider call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRecord {
    pub model: String,
    pub provider: String,
    pub messages: Vec<ChatMessage>,
    pub model_parameters: ModelParameters,
}

/// Outcome attached to a previously recorded generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: TokenUsage,
}

impl GenerationResult {
    pub fn from_completion(model: &str, completion: &ChatCompletion) -> Self {
        Self {
            model: model.to_string(),
            choices: completion.choices.clone(),
            usage: completion.usage.unwrap_or_default(),
        }
    }
}
