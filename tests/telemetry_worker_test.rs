use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use lingua_teacher::application::ports::TelemetrySink;
use lingua_teacher::domain::TraceId;
use lingua_teacher::infrastructure::telemetry::{
    HttpTelemetrySink, TelemetryEndpoint, TelemetryEvent, TelemetryWorker,
};

#[derive(Debug, Clone)]
struct Delivery {
    repository_id: String,
    authorization: Option<String>,
    event: Value,
}

#[derive(Clone)]
struct MockRepository {
    failures_remaining: Arc<AtomicUsize>,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

async fn receive_event(
    State(repository): State<MockRepository>,
    Path(repository_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    repository.deliveries.lock().unwrap().push(Delivery {
        repository_id,
        authorization: headers
            .get("authorization")
            .map(|v| v.to_str().unwrap().to_string()),
        event: serde_json::from_str(&body).unwrap(),
    });

    let failing = repository
        .failures_remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::ACCEPTED
    }
}

async fn start_mock_repository(
    failures: usize,
) -> (String, Arc<Mutex<Vec<Delivery>>>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let deliveries = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/v1/log-repositories/{id}/events", post(receive_event))
        .with_state(MockRepository {
            failures_remaining: Arc::new(AtomicUsize::new(failures)),
            deliveries: Arc::clone(&deliveries),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, deliveries, shutdown_tx)
}

fn endpoint(base_url: String, api_key: Option<&str>) -> TelemetryEndpoint {
    TelemetryEndpoint {
        base_url,
        repository_id: "repo-1".to_string(),
        api_key: api_key.map(str::to_string),
    }
}

#[test]
fn given_trailing_slash_when_building_events_url_then_joins_cleanly() {
    let endpoint = endpoint("https://logs.example.com/".to_string(), None);

    assert_eq!(
        endpoint.events_url(),
        "https://logs.example.com/v1/log-repositories/repo-1/events"
    );
}

#[tokio::test]
async fn given_queued_events_when_worker_runs_then_posts_each_with_bearer_key() {
    let (base_url, deliveries, shutdown_tx) = start_mock_repository(0).await;
    let (sender, receiver) = mpsc::channel(8);
    let worker = tokio::spawn(
        TelemetryWorker::new(receiver, endpoint(base_url, Some("log-key"))).run(),
    );
    let trace_id = TraceId::from_string("trace-9".to_string());

    sender.send(TelemetryEvent::trace_started(&trace_id)).await.unwrap();
    sender.send(TelemetryEvent::trace_ended(&trace_id)).await.unwrap();
    drop(sender);
    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .unwrap()
        .unwrap();

    let deliveries = deliveries.lock().unwrap().clone();
    assert_eq!(deliveries.len(), 2);
    for delivery in &deliveries {
        assert_eq!(delivery.repository_id, "repo-1");
        assert_eq!(delivery.authorization.as_deref(), Some("Bearer log-key"));
        assert_eq!(delivery.event["trace_id"], "trace-9");
    }
    assert_eq!(deliveries[0].event["type"], "trace_started");
    assert_eq!(deliveries[1].event["type"], "trace_ended");

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rejected_delivery_when_worker_runs_then_continues_with_next_event() {
    let (base_url, deliveries, shutdown_tx) = start_mock_repository(1).await;
    let (sink, worker) = HttpTelemetrySink::spawn(endpoint(base_url, None), 8);
    let trace_id = TraceId::new();

    sink.open_trace(&trace_id).unwrap();
    sink.record_retrieval(&trace_id, "dictionary", "Klingon", "nuqneH")
        .unwrap();
    sink.close_trace(&trace_id).unwrap();
    drop(sink);
    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .unwrap()
        .unwrap();

    let deliveries = deliveries.lock().unwrap().clone();
    let kinds: Vec<&str> = deliveries
        .iter()
        .map(|d| d.event["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["trace_started", "retrieval", "trace_ended"]);
    assert!(deliveries.iter().all(|d| d.authorization.is_none()));

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_endpoint_when_worker_runs_then_drains_queue_and_stops() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let (sink, worker) = HttpTelemetrySink::spawn(endpoint(base_url, Some("log-key")), 4);
    let trace_id = TraceId::new();

    sink.open_trace(&trace_id).unwrap();
    sink.close_trace(&trace_id).unwrap();
    drop(sink);

    assert!(
        tokio::time::timeout(Duration::from_secs(10), worker)
            .await
            .unwrap()
            .is_ok()
    );
}
