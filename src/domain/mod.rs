mod chat_message;
mod completion;
mod difficulty;
mod message_role;
mod teacher_request;
mod telemetry_record;
mod trace_id;

pub use chat_message::ChatMessage;
pub use completion::{ChatCompletion, CompletionChoice, CompletionMessage, TokenUsage};
pub use difficulty::Difficulty;
pub use message_role::MessageRole;
pub use teacher_request::TeacherRequest;
pub use telemetry_record::{GenerationRecord, GenerationResult, ModelParameters};
pub use trace_id::{GenerationId, TraceId};
