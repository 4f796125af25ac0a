mod prompt_builder;
mod reference_library;
mod teacher_service;

pub use prompt_builder::build_system_prompt;
pub use reference_library::{Reference, ReferenceDocument, ReferenceLibrary};
pub use teacher_service::{CompletionSettings, TeacherError, TeacherService, build_conversation};
