//! Dialog state codec.
//!
//! Application state survives between turns only as an opaque string token
//! that the platform hands back verbatim. The token is the JSON encoding of a
//! `{state, data}` envelope.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::foundation::ConversationError;

/// Application-defined state object that exposes a stable name.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// enum Step { AwaitNumber }
///
/// impl NamedState for Step {
///     fn name(&self) -> &str { "AWAIT_NUM" }
/// }
///
/// adapter.set_state(State::named(Step::AwaitNumber));
/// ```
pub trait NamedState: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// Application state identifier.
#[derive(Debug, Clone)]
pub enum State {
    /// Plain identifier.
    Plain(String),
    /// Application state object.
    Named(Arc<dyn NamedState>),
}

impl State {
    /// Creates a plain state identifier.
    pub fn plain(id: impl Into<String>) -> Self {
        State::Plain(id.into())
    }

    /// Wraps a named state object.
    pub fn named<S: NamedState + 'static>(state: S) -> Self {
        State::Named(Arc::new(state))
    }

    /// The identifier written into the token.
    pub fn name(&self) -> &str {
        match self {
            State::Plain(id) => id,
            State::Named(state) => state.name(),
        }
    }
}

/// States compare by name, so a decoded plain state equals the named
/// state it was encoded from.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for State {}

impl From<&str> for State {
    fn from(id: &str) -> Self {
        State::plain(id)
    }
}

impl From<String> for State {
    fn from(id: String) -> Self {
        State::Plain(id)
    }
}

/// Decoded `{state, data}` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogState {
    pub state: Option<State>,
    pub data: Value,
}

impl DialogState {
    pub fn new(state: Option<State>, data: Value) -> Self {
        Self { state, data }
    }

    /// Envelope as a JSON object. An unset state is omitted.
    pub fn to_value(&self) -> Value {
        let mut envelope = Map::new();
        if let Some(state) = &self.state {
            envelope.insert("state".to_string(), Value::String(state.name().to_string()));
        }
        envelope.insert("data".to_string(), self.data.clone());
        Value::Object(envelope)
    }
}

impl Default for DialogState {
    /// First-turn state: no state identifier and empty data.
    fn default() -> Self {
        Self {
            state: None,
            data: Value::Object(Map::new()),
        }
    }
}

/// Serializes the envelope into a token string.
pub fn encode(state: Option<&State>, data: &Value) -> Result<String, ConversationError> {
    let envelope = DialogState::new(state.cloned(), data.clone()).to_value();
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a token back into its envelope.
///
/// A missing or empty token is the normal first-turn condition and yields
/// [`DialogState::default`]. A token that is not a JSON object is an error;
/// callers degrade to the default after reporting it.
pub fn decode(token: Option<&str>) -> Result<DialogState, ConversationError> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(DialogState::default()),
    };

    let parsed: Value = serde_json::from_str(token)
        .map_err(|e| ConversationError::malformed_token(e.to_string()))?;

    let Value::Object(mut envelope) = parsed else {
        return Err(ConversationError::malformed_token("token is not a JSON object"));
    };

    let state = match envelope.remove("state") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(State::Plain(id)),
        Some(other) => Some(State::Plain(other.to_string())),
    };
    let data = match envelope.remove("data") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(data) => data,
    };

    Ok(DialogState { state, data })
}
