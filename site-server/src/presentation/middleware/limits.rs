use std::time::Duration;

use axum::{BoxError, Router, error_handling::HandleErrorLayer, http::StatusCode};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

use crate::infrastructure::settings::Settings;

/// Body size, concurrency and per-request time limits from settings.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_limit_error))
            .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
            .timeout(Duration::from_secs(settings.http_request_timeout_secs))
            .layer(RequestBodyLimitLayer::new(
                settings.http_request_body_limit_bytes,
            )),
    )
}

async fn handle_limit_error(err: BoxError) -> (StatusCode, &'static str) {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        (StatusCode::REQUEST_TIMEOUT, "request timed out")
    } else {
        warn!(error = %err, "request rejected by limits");
        (StatusCode::SERVICE_UNAVAILABLE, "service unavailable")
    }
}
