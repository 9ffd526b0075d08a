//! Error sink adapters.
//!
//! - `TracingErrorSink` - Logs every reported error (production default)
//! - `RecordingErrorSink` - Captures reports for test assertions

mod recording;
mod tracing_sink;

pub use recording::RecordingErrorSink;
pub use tracing_sink::TracingErrorSink;
