use std::time::Duration;

use axum::Router;
use axum::http::{Request, Response};
use tower_http::trace::TraceLayer;
use tracing::{Level, Span};

/// One span per request with method and path, plus a status/latency line.
/// Query strings are left out of the span since they carry search text.
pub(crate) fn apply_trace(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<_>| {
                let method = req.method().clone();
                let path = req.uri().path().to_string();
                tracing::span!(Level::INFO, "http", %method, %path)
            })
            .on_response(|res: &Response<_>, latency: Duration, _span: &Span| {
                let elapsed_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                tracing::info!(status = %res.status(), elapsed_ms, "response");
            }),
    )
}
