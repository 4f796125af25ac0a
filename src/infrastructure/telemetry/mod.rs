mod http_telemetry_sink;
mod telemetry_event;
mod tracing_telemetry_sink;

pub use http_telemetry_sink::{HttpTelemetrySink, TelemetryEndpoint, TelemetryWorker};
pub use telemetry_event::TelemetryEvent;
pub use tracing_telemetry_sink::TracingTelemetrySink;
