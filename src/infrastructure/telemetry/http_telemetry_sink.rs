use reqwest::Client;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use crate::application::ports::{TelemetryError, TelemetrySink};
use crate::domain::{GenerationId, GenerationRecord, GenerationResult, TraceId};

use super::telemetry_event::TelemetryEvent;

/// Where and how the worker delivers events.
#[derive(Debug, Clone)]
pub struct TelemetryEndpoint {
    pub base_url: String,
    pub repository_id: String,
    pub api_key: Option<String>,
}

impl TelemetryEndpoint {
    pub fn events_url(&self) -> String {
        format!(
            "{}/v1/log-repositories/{}/events",
            self.base_url.trim_end_matches('/'),
            self.repository_id
        )
    }
}

/// Queues telemetry events for a background worker that posts them over HTTP.
///
/// Enqueueing never waits: a full queue drops the event and reports
/// `TelemetryError::QueueFull`.
pub struct HttpTelemetrySink {
    sender: mpsc::Sender<TelemetryEvent>,
}

impl HttpTelemetrySink {
    pub fn new(sender: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { sender }
    }

    /// Creates the sink together with its running delivery worker.
    pub fn spawn(endpoint: TelemetryEndpoint, queue_capacity: usize) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));
        let worker = TelemetryWorker::new(receiver, endpoint);
        let handle = tokio::spawn(worker.run());
        (Self::new(sender), handle)
    }

    fn enqueue(&self, event: TelemetryEvent) -> Result<(), TelemetryError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => TelemetryError::QueueFull,
            TrySendError::Closed(_) => TelemetryError::Closed,
        })
    }
}

impl TelemetrySink for HttpTelemetrySink {
    fn open_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        self.enqueue(TelemetryEvent::trace_started(trace_id))
    }

    fn record_retrieval(
        &self,
        trace_id: &TraceId,
        name: &str,
        input: &str,
        output: &str,
    ) -> Result<(), TelemetryError> {
        self.enqueue(TelemetryEvent::retrieval(trace_id, name, input, output))
    }

    fn record_generation(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        record: &GenerationRecord,
    ) -> Result<(), TelemetryError> {
        self.enqueue(TelemetryEvent::generation_started(
            trace_id,
            generation_id,
            record,
        ))
    }

    fn record_result(
        &self,
        trace_id: &TraceId,
        generation_id: &GenerationId,
        result: &GenerationResult,
    ) -> Result<(), TelemetryError> {
        self.enqueue(TelemetryEvent::generation_result(
            trace_id,
            generation_id,
            result,
        ))
    }

    fn close_trace(&self, trace_id: &TraceId) -> Result<(), TelemetryError> {
        self.enqueue(TelemetryEvent::trace_ended(trace_id))
    }
}

pub struct TelemetryWorker {
    receiver: mpsc::Receiver<TelemetryEvent>,
    client: Client,
    endpoint: TelemetryEndpoint,
}

impl TelemetryWorker {
    pub fn new(receiver: mpsc::Receiver<TelemetryEvent>, endpoint: TelemetryEndpoint) -> Self {
        Self {
            receiver,
            client: Client::new(),
            endpoint,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(url = %self.endpoint.events_url(), "Telemetry worker started");
        while let Some(event) = self.receiver.recv().await {
            if let Err(e) = self.deliver(&event).await {
                tracing::warn!(
                    error = %e,
                    kind = event.kind(),
                    trace_id = %event.trace_id(),
                    "Failed to deliver telemetry event"
                );
            }
        }
        tracing::info!("Telemetry worker stopped: channel closed");
    }

    async fn deliver(&self, event: &TelemetryEvent) -> Result<(), String> {
        let mut request = self.client.post(self.endpoint.events_url()).json(event);
        if let Some(api_key) = &self.endpoint.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        Ok(())
    }
}
