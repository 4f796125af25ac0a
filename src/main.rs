use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use lingua_teacher::application::ports::TelemetrySink;
use lingua_teacher::application::services::{ReferenceLibrary, TeacherService};
use lingua_teacher::infrastructure::llm::OpenAiClient;
use lingua_teacher::infrastructure::observability::{TracingConfig, init_tracing};
use lingua_teacher::infrastructure::telemetry::{HttpTelemetrySink, TracingTelemetrySink};
use lingua_teacher::infrastructure::text_processing::PdfAdapter;
use lingua_teacher::presentation::{AppState, Environment, Settings, create_router};

const TELEMETRY_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    init_tracing(&TracingConfig::for_environment(environment.as_str()));

    let settings = Settings::load(environment).context("Failed to load settings")?;

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No completion API key configured; provider calls will be rejected");
    }

    let llm_client = Arc::new(OpenAiClient::with_base_url(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
    ));

    let references = Arc::new(ReferenceLibrary::new(
        Arc::new(PdfAdapter::new()),
        settings.references.documents(),
    ));
    tracing::info!(languages = ?references.languages(), "Reference library configured");

    let (telemetry, telemetry_worker): (Arc<dyn TelemetrySink>, Option<JoinHandle<()>>) =
        match settings.telemetry.endpoint() {
            Some(endpoint) => {
                let (sink, worker) =
                    HttpTelemetrySink::spawn(endpoint, settings.telemetry.queue_capacity);
                (Arc::new(sink) as Arc<dyn TelemetrySink>, Some(worker))
            }
            None => {
                tracing::info!("No telemetry endpoint configured; recording telemetry to logs");
                (Arc::new(TracingTelemetrySink::new()) as Arc<dyn TelemetrySink>, None)
            }
        };

    let teacher_service = Arc::new(TeacherService::new(
        llm_client,
        references,
        telemetry,
        settings.llm.completion_settings(),
    ));

    let router = create_router(AppState::new(teacher_service));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last sink handle, so the worker now drains and exits.
    if let Some(worker) = telemetry_worker {
        tracing::info!("Flushing queued telemetry events");
        if tokio::time::timeout(TELEMETRY_FLUSH_TIMEOUT, worker)
            .await
            .is_err()
        {
            tracing::warn!("Telemetry flush timed out; remaining events dropped");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
