//! Error sink that logs every report through `tracing`.

use crate::domain::foundation::ConversationError;
use crate::ports::ErrorSink;

/// Logs reported errors at `warn` level with structured code and category.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl TracingErrorSink {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorSink for TracingErrorSink {
    fn report(&self, error: &ConversationError) {
        tracing::warn!(
            code = %error.code(),
            category = %error.category(),
            "{}",
            error
        );
    }
}
