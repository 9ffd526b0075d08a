//! HTTP adapters - Axum integration for the conversation adapter.

pub mod webhook;

// Re-export key types for convenience
pub use webhook::{webhook_router, FulfillmentHandler, HttpConversation, WebhookAppState};
