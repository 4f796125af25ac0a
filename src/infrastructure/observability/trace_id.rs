use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use crate::domain::TraceId;

/// Correlation header read from callers, forwarded to the provider and
/// echoed on responses.
pub const TRACE_ID_HEADER: &str = "maxim-trace-id";

/// Also accepted inbound when `TRACE_ID_HEADER` is absent.
pub const TRACE_ID_HEADER_ALIAS: &str = "x-trace-id";

/// Resolves the trace id for a request and exposes it as a `TraceId` extension.
///
/// A caller-supplied header value is reused; otherwise a fresh id is minted.
/// The resolved id is echoed back on the response.
pub async fn trace_id_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = [TRACE_ID_HEADER, TRACE_ID_HEADER_ALIAS]
        .into_iter()
        .find_map(|name| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.trim().is_empty())
        })
        .map(|v| TraceId::from_string(v.to_string()))
        .unwrap_or_default();

    request.extensions_mut().insert(trace_id.clone());

    let span = tracing::info_span!(
        "request",
        trace_id = %trace_id,
        method = %request.method(),
        uri = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(trace_id.as_str()) {
        response.headers_mut().insert(TRACE_ID_HEADER, header_value);
    }

    response
}
