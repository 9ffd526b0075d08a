//! HTTP handler for the assistant webhook endpoint.
//!
//! Each POST builds one [`ConversationAdapter`] over an [`HttpExchange`],
//! hands it to the application's [`FulfillmentHandler`], and replies with
//! whatever the adapter sent.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde_json::Value;

use super::dto::ErrorResponse;
use super::exchange::HttpExchange;
use crate::application::{AdapterOptions, ConversationAdapter, SessionStartHook};
use crate::domain::conversation::ApiVersion;
use crate::ports::ErrorSink;

/// Adapter type handed to fulfillment code by the HTTP layer.
pub type HttpConversation = ConversationAdapter<HttpExchange>;

/// Application logic for one turn.
///
/// Implementations read fields from the adapter and finish with `ask` or
/// `tell`. A turn that ends without a reply is answered with a 500.
#[async_trait]
pub trait FulfillmentHandler: Send + Sync {
    async fn handle(&self, conversation: &mut HttpConversation);

    /// Hook to run when the platform starts a new session.
    fn session_start_hook(&self) -> Option<SessionStartHook> {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook route.
#[derive(Clone)]
pub struct WebhookAppState {
    pub handler: Arc<dyn FulfillmentHandler>,
    pub error_sink: Arc<dyn ErrorSink>,
    pub default_api_version: ApiVersion,
}

impl WebhookAppState {
    pub fn new(
        handler: Arc<dyn FulfillmentHandler>,
        error_sink: Arc<dyn ErrorSink>,
        default_api_version: ApiVersion,
    ) -> Self {
        Self {
            handler,
            error_sink,
            default_api_version,
        }
    }

    fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            default_api_version: self.default_api_version.clone(),
            session_started: self.handler.session_start_hook(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST {webhook path} - Handle one assistant turn
pub async fn handle_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| WebhookApiError::InvalidJson(e.to_string()))?;

    let mut conversation = ConversationAdapter::with_options(
        HttpExchange::new(headers),
        body,
        state.error_sink.clone(),
        state.adapter_options(),
    );

    state.handler.handle(&mut conversation).await;

    let (status, reply) = conversation
        .into_transport()
        .into_reply()
        .ok_or(WebhookApiError::NoResponse)?;
    Ok((status, Json(reply)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Failures that prevent a turn from producing an assistant response.
#[derive(Debug)]
pub enum WebhookApiError {
    /// Request body is not JSON.
    InvalidJson(String),
    /// The fulfillment finished without asking or telling.
    NoResponse,
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            WebhookApiError::InvalidJson(reason) => {
                tracing::warn!(%reason, "Rejected webhook body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details(
                        "INVALID_JSON",
                        "Request body is not valid JSON",
                        serde_json::json!({ "reason": reason }),
                    ),
                )
            }
            WebhookApiError::NoResponse => {
                tracing::error!("Fulfillment finished without a response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("NO_RESPONSE", "No response was produced for this turn"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
