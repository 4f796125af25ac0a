use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::TeacherService;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub teacher_service: Arc<TeacherService<L>>,
}

impl<L> AppState<L>
where
    L: LlmClient,
{
    pub fn new(teacher_service: Arc<TeacherService<L>>) -> Self {
        Self { teacher_service }
    }
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            teacher_service: Arc::clone(&self.teacher_service),
        }
    }
}
