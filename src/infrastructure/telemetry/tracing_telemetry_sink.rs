use crate::application::ports::{TelemetryError, TelemetrySink};
use crate::domain::{GenerationId, GenerationRecord, GenerationResult, TraceId};

/// Writes telemetry as structured log records when no log repository is configured.
#[derive(Default)]
pub struct TracingTelemetrySink;

impl TracingTelemetrySink {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySink for TracingTelemetrySink {
    fn open_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        tracing::debug!(trace_id = %trace_id, "trace opened");
        Ok(())
    }

    fn record_retrieval(
        &self,
        trace_id: &TraceId,
        name: &str,
        input: &str,
        output: &str,
    ) -> Result<(), TelemetryError> {
        tracing::info!(
            trace_id = %trace_id,
            name,
            input,
            output_chars = output.chars().count(),
            "retrieval recorded"
        );
        Ok(())
    }

    fn record_generation(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        record: &GenerationRecord,
    ) -> Result<(), TelemetryError> {
        tracing::info!(
            trace_id = %trace_id,
            generation_id = %generation_id.as_uuid(),
            model = %record.model,
            provider = %record.provider,
            temperature = record.model_parameters.temperature,
            message_count = record.messages.len(),
            "generation requested"
        );
        Ok(())
    }

    fn record_result(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        result: &GenerationResult,
    ) -> Result<(), TelemetryError> {
        tracing::info!(
            trace_id = %trace_id,
            generation_id = %generation_id.as_uuid(),
            model = %result.model,
            choices = result.choices.len(),
            prompt_tokens = result.usage.prompt_tokens,
            completion_tokens = result.usage.completion_tokens,
            total_tokens = result.usage.total_tokens,
            "generation completed"
        );
        Ok(())
    }

    fn close_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        tracing::debug!(trace_id = %trace_id, "trace closed");
        Ok(())
    }
}
