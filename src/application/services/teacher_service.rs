use std::sync::Arc;

use crate::application::ports::{
    CompletionRequest, LlmClient, LlmClientError, TelemetryError, TelemetrySink,
};
use crate::domain::{
    ChatCompletion, ChatMessage, Difficulty, GenerationId, GenerationRecord, GenerationResult,
    ModelParameters, TeacherRequest, TraceId,
};

use super::prompt_builder::build_system_prompt;
use super::reference_library::ReferenceLibrary;

/// Fixed per deployment; applied to every completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub provider: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            provider: "openai".to_string(),
        }
    }
}

pub struct TeacherService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    references: Arc<ReferenceLibrary>,
    telemetry: Arc<dyn TelemetrySink>,
    settings: CompletionSettings,
}

impl<L> TeacherService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        references: Arc<ReferenceLibrary>,
        telemetry: Arc<dyn TelemetrySink>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            llm_client,
            references,
            telemetry,
            settings,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            target_language = %request.target_language,
            difficulty = %request.difficulty,
            message_count = request.messages.len(),
        )
    )]
    pub async fn get_teacher_response(
        &self,
        request: TeacherRequest,
    ) -> Result<ChatCompletion, TeacherError> {
        let trace_id = request.trace_id.clone().unwrap_or_default();
        report("open_trace", self.telemetry.open_trace(&trace_id));

        let outcome = self.respond(&trace_id, request).await;

        report("close_trace", self.telemetry.close_trace(&trace_id));
        outcome
    }

    async fn respond(
        &self,
        trace_id: &TraceId,
        request: TeacherRequest,
    ) -> Result<ChatCompletion, TeacherError> {
        let reference = self
            .references
            .reference_for(&request.target_language)
            .await;

        if let Some(reference) = &reference {
            report(
                "record_retrieval",
                self.telemetry.record_retrieval(
                    trace_id,
                    &reference.name,
                    &request.target_language,
                    &reference.text,
                ),
            );
        }

        let system_prompt = build_system_prompt(
            &request.native_language,
            &request.target_language,
            Difficulty::parse_lenient(&request.difficulty),
            reference.as_ref().map(|r| &*r.text),
        );

        let conversation = build_conversation(system_prompt, request.messages);

        let generation_id = GenerationId::new();
        let record = GenerationRecord {
            model: self.settings.model.clone(),
            provider: self.settings.provider.clone(),
            messages: conversation.clone(),
            model_parameters: ModelParameters {
                temperature: self.settings.temperature,
            },
        };
        report(
            "record_generation",
            self.telemetry
                .record_generation(trace_id, &generation_id, &record),
        );

        let completion_request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: conversation,
            temperature: self.settings.temperature,
            trace_id: trace_id.clone(),
        };

        let completion = self
            .llm_client
            .chat_completion(&completion_request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, trace_id = %trace_id, "Completion provider call failed");
                TeacherError::Completion(e)
            })?;

        let result = GenerationResult::from_completion(&self.settings.model, &completion);
        report(
            "record_result",
            self.telemetry
                .record_result(trace_id, &generation_id, &result),
        );

        tracing::info!(
            trace_id = %trace_id,
            prompt_tokens = result.usage.prompt_tokens,
            completion_tokens = result.usage.completion_tokens,
            "Teacher response generated"
        );

        Ok(completion)
    }
}

/// Prepends the system prompt to the caller's messages, preserving their order.
pub fn build_conversation(system_prompt: String, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut conversation = Vec::with_capacity(messages.len() + 1);
    conversation.push(ChatMessage::system(system_prompt));
    conversation.extend(messages);
    conversation
}

fn report(stage: &'static str, outcome: Result<(), TelemetryError>) {
    if let Err(e) = outcome {
        tracing::warn!(error = %e, stage, "Telemetry event dropped");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TeacherError {
    #[error("failed to get response from completion provider")]
    Completion(#[source] LlmClientError),
}
