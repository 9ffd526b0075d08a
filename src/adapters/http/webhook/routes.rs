//! Axum router configuration for the webhook endpoint.

use std::time::Duration;

use axum::{routing::post, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{handle_webhook, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST {path}` - Handle one assistant turn
pub fn webhook_routes(path: &str) -> Router<WebhookAppState> {
    Router::new().route(path, post(handle_webhook))
}

/// Create the complete webhook application with tracing and timeouts.
///
/// # Example
///
/// ```ignore
/// let state = WebhookAppState::new(handler, Arc::new(TracingErrorSink::new()), ApiVersion::new(1));
/// let app = webhook_router("/webhook", state, Duration::from_secs(30));
/// axum::serve(listener, app).await?;
/// ```
pub fn webhook_router(path: &str, state: WebhookAppState, request_timeout: Duration) -> Router {
    webhook_routes(path)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
