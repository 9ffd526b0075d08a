//! ErrorSink port - Where the adapter reports validation failures.
//!
//! Every extractor or builder failure is reported here exactly once before
//! the facade returns an empty result. The host decides whether that means
//! logging, counting, or failing a test.

use crate::domain::foundation::ConversationError;

/// Port for receiving reported errors.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &ConversationError);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ErrorSink) {}

    struct Counting(Mutex<usize>);

    impl ErrorSink for Counting {
        fn report(&self, _error: &ConversationError) {
            *self.0.lock().unwrap() += 1;
        }
    }

    #[test]
    fn sink_receives_reports_through_trait_object() {
        let counting = Counting(Mutex::new(0));
        let sink: &dyn ErrorSink = &counting;
        sink.report(&ConversationError::MissingInputs);
        sink.report(&ConversationError::MissingUser);
        assert_eq!(*counting.0.lock().unwrap(), 2);
    }
}
