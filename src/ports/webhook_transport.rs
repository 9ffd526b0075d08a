//! WebhookTransport port - The host HTTP exchange for one turn.
//!
//! The adapter needs exactly two capabilities from its host: reading a
//! request header and sending a JSON body with a status code. Routing,
//! connection handling and timeouts stay with the host.

use http::StatusCode;
use serde_json::Value;

use crate::domain::foundation::ConversationError;

/// Port for the HTTP exchange that carries one turn.
///
/// # Example
///
/// ```ignore
/// let version = transport.header("Google-Actions-API-Version");
/// transport.send_json(StatusCode::OK, body)?;
/// ```
pub trait WebhookTransport: Send {
    /// Returns the value of a request header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Sends the response body with the given status.
    fn send_json(&mut self, status: StatusCode, body: Value) -> Result<(), ConversationError>;
}
