//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the conversation domain to its host:
//! - `http` - Axum webhook endpoint and in-memory transport
//! - `error_sink` - Tracing and recording error sinks

pub mod error_sink;
pub mod http;

pub use error_sink::{RecordingErrorSink, TracingErrorSink};
