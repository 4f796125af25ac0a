use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::domain::{ChatCompletion, ChatMessage};
use crate::infrastructure::observability::TRACE_ID_HEADER;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completions over any OpenAI-compatible HTTP API.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

impl OpenAiClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(
        skip(self, request),
        fields(model = %request.model, trace_id = %request.trace_id)
    )]
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatCompletion, LlmClientError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header(TRACE_ID_HEADER, request.trace_id.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            completion_id = %completion.id,
            choices = completion.choices.len(),
            "Chat completion received"
        );

        Ok(completion)
    }
}
