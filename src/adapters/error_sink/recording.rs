//! In-memory error sink for testing.
//!
//! Captures every reported error so tests can assert on what the adapter
//! signalled. Uses `.expect()` on its lock; not meant for production.

use std::sync::Mutex;

use crate::domain::foundation::{ConversationError, ErrorCode};
use crate::ports::ErrorSink;

/// Error sink that records reports for later assertions.
///
/// # Example
///
/// ```ignore
/// let sink = Arc::new(RecordingErrorSink::new());
/// let adapter = ConversationAdapter::new(transport, body, sink.clone());
/// adapter.intent();
/// assert_eq!(sink.codes(), vec![ErrorCode::MissingInputs]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingErrorSink {
    errors: Mutex<Vec<ConversationError>>,
}

impl RecordingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all reported errors in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn errors(&self) -> Vec<ConversationError> {
        self.errors
            .lock()
            .expect("RecordingErrorSink: lock poisoned")
            .clone()
    }

    /// Returns the codes of all reported errors in order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors().iter().map(ConversationError::code).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.errors().is_empty()
    }

    /// Clears all recorded errors.
    pub fn clear(&self) {
        self.errors
            .lock()
            .expect("RecordingErrorSink: lock poisoned")
            .clear();
    }
}

impl ErrorSink for RecordingErrorSink {
    fn report(&self, error: &ConversationError) {
        self.errors
            .lock()
            .expect("RecordingErrorSink: lock poisoned")
            .push(error.clone());
    }
}
