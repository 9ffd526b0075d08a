//! Webhook HTTP adapter - The assistant platform's fulfillment endpoint.
//!
//! Provides:
//! - `HttpExchange` - `WebhookTransport` implementation over axum headers
//! - `FulfillmentHandler` - Application callback run once per turn
//! - `webhook_router` - Router with tracing and timeout layers

pub mod dto;
pub mod exchange;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use exchange::HttpExchange;
pub use handlers::{FulfillmentHandler, HttpConversation, WebhookApiError, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
