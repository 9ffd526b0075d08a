//! In-memory HTTP exchange backing the webhook transport port.
//!
//! Wraps the request headers and captures the single JSON reply so the
//! axum handler can turn it into a response once the fulfillment is done.

use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::domain::foundation::ConversationError;
use crate::ports::WebhookTransport;

/// Headers in, one JSON reply out.
#[derive(Debug, Default)]
pub struct HttpExchange {
    headers: HeaderMap,
    reply: Option<(StatusCode, Value)>,
}

impl HttpExchange {
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers,
            reply: None,
        }
    }

    pub fn into_reply(self) -> Option<(StatusCode, Value)> {
        self.reply
    }
}

impl WebhookTransport for HttpExchange {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    fn send_json(&mut self, status: StatusCode, body: Value) -> Result<(), ConversationError> {
        if self.reply.is_some() {
            return Err(ConversationError::transport("a reply was already captured"));
        }
        self.reply = Some((status, body));
        Ok(())
    }
}
