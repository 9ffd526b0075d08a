//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversation domain and its host. Adapters implement these ports.
//!
//! - `WebhookTransport` - Header access and response sending for one turn
//! - `ErrorSink` - Receives every reported validation failure

mod error_sink;
mod webhook_transport;

pub use error_sink::ErrorSink;
pub use webhook_transport::WebhookTransport;
