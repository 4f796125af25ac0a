use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{GenerationId, GenerationRecord, GenerationResult, TraceId};

/// Wire shape of one record sent to the log repository.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    TraceStarted {
        trace_id: String,
        timestamp: DateTime<Utc>,
    },
    Retrieval {
        trace_id: String,
        retrieval_id: Uuid,
        name: String,
        input: String,
        output: String,
        timestamp: DateTime<Utc>,
    },
    GenerationStarted {
        trace_id: String,
        generation_id: Uuid,
        #[serde(flatten)]
        record: GenerationRecord,
        timestamp: DateTime<Utc>,
    },
    GenerationResult {
        trace_id: String,
        generation_id: Uuid,
        object: &'static str,
        #[serde(flatten)]
        result: GenerationResult,
        timestamp: DateTime<Utc>,
    },
    TraceEnded {
        trace_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl TelemetryEvent {
    pub fn trace_started(trace_id: &TraceId) -> Self {
        Self::TraceStarted {
            trace_id: trace_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn retrieval(trace_id: &TraceId, name: &str, input: &str, output: &str) -> Self {
        Self::Retrieval {
            trace_id: trace_id.to_string(),
            retrieval_id: Uuid::new_v4(),
            name: name.to_string(),
            input: input.to_string(),
            output: output.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn generation_started(
        trace_id: &TraceId,
        generation_id: &GenerationId,
        record: &GenerationRecord,
    ) -> Self {
        Self::GenerationStarted {
            trace_id: trace_id.to_string(),
            generation_id: generation_id.as_uuid(),
            record: record.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn generation_result(
        trace_id: &TraceId,
        generation_id: &GenerationId,
        result: &GenerationResult,
    ) -> Self {
        Self::GenerationResult {
            trace_id: trace_id.to_string(),
            generation_id: generation_id.as_uuid(),
            object: "chat.completion",
            result: result.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn trace_ended(trace_id: &TraceId) -> Self {
        Self::TraceEnded {
            trace_id: trace_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::TraceStarted { .. } => "trace_started",
            Self::Retrieval { .. } => "retrieval",
            Self::GenerationStarted { .. } => "generation_started",
            Self::GenerationResult { .. } => "generation_result",
            Self::TraceEnded { .. } => "trace_ended",
        }
    }

    pub fn trace_id(&self) -> &str {
        match self {
            Self::TraceStarted { trace_id, .. }
            | Self::Retrieval { trace_id, .. }
            | Self::GenerationStarted { trace_id, .. }
            | Self::GenerationResult { trace_id, .. }
            | Self::TraceEnded { trace_id, .. } => trace_id,
        }
    }
}
