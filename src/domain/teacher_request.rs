use super::{ChatMessage, TraceId};

/// Everything the teacher service needs to answer one chat turn.
#[derive(Debug, Clone)]
pub struct TeacherRequest {
    pub native_language: String,
    pub target_language: String,
    /// Raw difficulty value as received; unrecognised tiers are tolerated.
    pub difficulty: String,
    pub messages: Vec<ChatMessage>,
    pub trace_id: Option<TraceId>,
}
