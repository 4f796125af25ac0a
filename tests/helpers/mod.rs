#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lingua_teacher::application::ports::{
    CompletionRequest, DocumentLoader, ExtractionError, LlmClient, LlmClientError,
    TelemetryError, TelemetrySink,
};
use lingua_teacher::application::services::{
    CompletionSettings, ReferenceDocument, ReferenceLibrary, TeacherService,
};
use lingua_teacher::domain::{
    ChatCompletion, CompletionChoice, CompletionMessage, GenerationId, GenerationRecord,
    GenerationResult, MessageRole, TokenUsage, TraceId,
};

pub const KLINGON_TEXT: &str = "nuqneH means hello. Qapla' means success.";

pub fn sample_completion(reply: &str, usage: Option<TokenUsage>) -> ChatCompletion {
    ChatCompletion {
        id: "chatcmpl-test".to_string(),
        object: "chat.completion".to_string(),
        created: 1_700_000_000,
        model: "gpt-4o-mini".to_string(),
        choices: vec![CompletionChoice {
            index: 0,
            message: CompletionMessage {
                role: MessageRole::Assistant,
                content: Some(reply.to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage,
    }
}

/// Records every request and answers with a fixed completion or a failure.
pub struct RecordingLlmClient {
    pub requests: Mutex<Vec<CompletionRequest>>,
    fail: bool,
    usage: Option<TokenUsage>,
}

impl RecordingLlmClient {
    pub fn succeeding() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
            usage: Some(TokenUsage {
                prompt_tokens: 12,
                completion_tokens: 8,
                total_tokens: 20,
            }),
        }
    }

    pub fn without_usage() -> Self {
        Self {
            usage: None,
            ..Self::succeeding()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatCompletion, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(LlmClientError::ApiRequestFailed(
                "HTTP 500: provider secret stack trace".to_string(),
            ));
        }
        Ok(sample_completion("Bonjour !", self.usage))
    }
}

/// Document loader that counts calls and returns a canned outcome.
pub struct CountingLoader {
    calls: AtomicUsize,
    text: Option<String>,
}

impl CountingLoader {
    pub fn returning(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            text: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocumentLoader for CountingLoader {
    async fn extract_text(&self, _path: &Path) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.text.clone().ok_or(ExtractionError::ReadFailed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryCall {
    Open(String),
    Retrieval {
        name: String,
        input: String,
        output: String,
    },
    Generation(GenerationRecord),
    Result(GenerationResult),
    Close(String),
}

/// Telemetry sink that remembers every notification, optionally failing all of them.
#[derive(Default)]
pub struct RecordingTelemetry {
    calls: Mutex<Vec<TelemetryCall>>,
    fail: bool,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<TelemetryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn opens(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, TelemetryCall::Open(_)))
            .count()
    }

    pub fn closes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, TelemetryCall::Close(_)))
            .count()
    }

    pub fn retrievals(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, TelemetryCall::Retrieval { .. }))
            .count()
    }

    fn push(&self, call: TelemetryCall) -> Result<(), TelemetryError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(TelemetryError::Closed)
        } else {
            Ok(())
        }
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn open_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        self.push(TelemetryCall::Open(trace_id.to_string()))
    }

    fn record_retrieval(
        &self,
        _trace_id: &TraceId,
        name: &str,
        input: &str,
        output: &str,
    ) -> Result<(), TelemetryError> {
        self.push(TelemetryCall::Retrieval {
            name: name.to_string(),
            input: input.to_string(),
            output: output.to_string(),
        })
    }

    fn record_generation(
        &self,
        _trace_id: &TraceId,
        _generation_id: &GenerationId,
        record: &GenerationRecord,
    ) -> Result<(), TelemetryError> {
        self.push(TelemetryCall::Generation(record.clone()))
    }

    fn record_result(
        &self,
        _trace_id: &TraceId,
        _generation_id: &GenerationId,
        result: &GenerationResult,
    ) -> Result<(), TelemetryError> {
        self.push(TelemetryCall::Result(result.clone()))
    }

    fn close_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        self.push(TelemetryCall::Close(trace_id.to_string()))
    }
}

pub fn klingon_document() -> ReferenceDocument {
    ReferenceDocument {
        language: "Klingon".to_string(),
        name: "klingon-dictionary".to_string(),
        path: PathBuf::from("data/klingon.pdf"),
    }
}

pub struct Harness {
    pub llm: Arc<RecordingLlmClient>,
    pub loader: Arc<CountingLoader>,
    pub telemetry: Arc<RecordingTelemetry>,
    pub service: Arc<TeacherService<RecordingLlmClient>>,
}

pub fn harness(
    llm: RecordingLlmClient,
    loader: CountingLoader,
    telemetry: RecordingTelemetry,
) -> Harness {
    let llm = Arc::new(llm);
    let loader = Arc::new(loader);
    let telemetry = Arc::new(telemetry);

    let references = Arc::new(ReferenceLibrary::new(
        Arc::clone(&loader) as Arc<dyn DocumentLoader>,
        vec![klingon_document()],
    ));

    let service = Arc::new(TeacherService::new(
        Arc::clone(&llm),
        references,
        Arc::clone(&telemetry) as Arc<dyn TelemetrySink>,
        CompletionSettings::default(),
    ));

    Harness {
        llm,
        loader,
        telemetry,
        service,
    }
}

pub fn default_harness() -> Harness {
    harness(
        RecordingLlmClient::succeeding(),
        CountingLoader::returning(KLINGON_TEXT),
        RecordingTelemetry::new(),
    )
}
