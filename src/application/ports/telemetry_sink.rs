use crate::domain::{GenerationId, GenerationRecord, GenerationResult, TraceId};

/// Observer notified at each lifecycle point of a teacher request.
///
/// Implementations must not block: the service calls these inline on the
/// request path and only logs the returned errors.
pub trait TelemetrySink: Send + Sync {
    fn open_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError>;

    fn record_retrieval(
        &self,
        trace_id: &TraceId,
        name: &str,
        input: &str,
        output: &str,
    ) -> Result<(), TelemetryError>;

    fn record_generation(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        record: &GenerationRecord,
    ) -> Result<(), TelemetryError>;

    fn record_result(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        result: &GenerationResult,
    ) -> Result<(), TelemetryError>;

    fn close_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("telemetry queue is full")]
    QueueFull,
    #[error("telemetry worker has shut down")]
    Closed,
}
