use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::LlmClient;
use crate::application::services::TeacherError;
use crate::domain::{ChatMessage, TeacherRequest, TraceId};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::chat_types::{ChatRequest, DataResponse, ErrorResponse};

#[derive(Debug, thiserror::Error)]
pub enum ChatRequestError {
    #[error("unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Teacher(#[from] TeacherError),
}

impl IntoResponse for ChatRequestError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "API error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::INTERNAL),
        )
            .into_response()
    }
}

/// `POST /api/v1/chat`: one learner message in, one teacher completion out.
///
/// The body is read and parsed by hand so that every failure (oversized or
/// unreadable bodies and malformed JSON included) produces the same 500
/// response.
#[tracing::instrument(skip_all)]
pub async fn chat_handler<L>(
    State(state): State<AppState<L>>,
    Extension(trace_id): Extension<TraceId>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ChatRequestError>
where
    L: LlmClient + 'static,
{
    let body = body?;
    let request: ChatRequest = serde_json::from_slice(&body)?;

    tracing::debug!(
        native_language = %request.native_language,
        target_language = %request.target_language,
        difficulty = %request.difficulty,
        prompt = %sanitize_prompt(&request.message),
        "Processing chat request"
    );

    let teacher_request = TeacherRequest {
        native_language: request.native_language,
        target_language: request.target_language,
        difficulty: request.difficulty,
        messages: vec![ChatMessage::user(request.message)],
        trace_id: Some(trace_id),
    };

    let completion = state
        .teacher_service
        .get_teacher_response(teacher_request)
        .await?;

    tracing::info!("Chat request successful");
    Ok((StatusCode::OK, Json(DataResponse { data: completion })).into_response())
}
