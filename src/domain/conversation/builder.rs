//! Response builder.
//!
//! Pure constructors for the "ask" and "tell" envelopes and their nested
//! prompt and expected-intent structures. Dialect-specific field names are
//! chosen here from an explicit [`Dialect`] argument.

use serde_json::{json, Map, Value};

use super::dialog_state::{self, DialogState};
use super::permission::{PermissionSpec, PERMISSION_VALUE_SPEC_TYPE};
use super::response::{AssistantResponse, ExpectedInput, ExpectedIntent, InputPrompt, Prompt};
use super::{Dialect, StandardIntent};
use crate::domain::foundation::ConversationError;

/// Maximum number of re-prompts spoken when the user stays silent.
pub const MAX_NO_INPUT_PROMPTS: usize = 3;

/// Prompt text sent with permission requests; the platform renders its own.
pub const PERMISSION_PROMPT_PLACEHOLDER: &str = "PLACEHOLDER_FOR_PERMISSION";

/// Prompt argument accepted by [`build_ask_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskPrompt {
    /// Fully built prompt.
    Built(InputPrompt),
    /// Raw text; SSML is auto-detected.
    Text(String),
}

impl From<InputPrompt> for AskPrompt {
    fn from(prompt: InputPrompt) -> Self {
        AskPrompt::Built(prompt)
    }
}

impl From<&str> for AskPrompt {
    fn from(text: &str) -> Self {
        AskPrompt::Text(text.to_string())
    }
}

impl From<String> for AskPrompt {
    fn from(text: String) -> Self {
        AskPrompt::Text(text)
    }
}

/// Heuristic SSML check: the trimmed text is wrapped in a `<speak>` element.
pub fn is_ssml(text: &str) -> bool {
    let lower = text.trim().to_ascii_lowercase();
    let opens = lower.starts_with("<speak>")
        || lower
            .strip_prefix("<speak")
            .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    opens && lower.ends_with("</speak>")
}

/// Builds an input prompt from an initial text and optional re-prompts.
///
/// An empty initial text yields no initial prompt. More than
/// [`MAX_NO_INPUT_PROMPTS`] re-prompts is rejected.
pub fn build_input_prompt(
    is_ssml: bool,
    initial_prompt: &str,
    no_inputs: &[&str],
) -> Result<InputPrompt, ConversationError> {
    if no_inputs.len() > MAX_NO_INPUT_PROMPTS {
        return Err(ConversationError::InvalidNoInputCount {
            count: no_inputs.len(),
            max: MAX_NO_INPUT_PROMPTS,
        });
    }

    let initial_prompts = if initial_prompt.is_empty() {
        Vec::new()
    } else {
        vec![Prompt::new(is_ssml, initial_prompt)]
    };

    Ok(InputPrompt {
        initial_prompts,
        no_input_prompts: no_inputs
            .iter()
            .map(|text| Prompt::new(is_ssml, *text))
            .collect(),
    })
}

/// Builds an expected intent with no value payload.
pub fn build_expected_intent(intent: &str) -> Result<ExpectedIntent, ConversationError> {
    if intent.is_empty() {
        return Err(ConversationError::InvalidIntent);
    }
    Ok(ExpectedIntent::named(intent))
}

/// Builds an "ask" response.
///
/// The token carries `explicit_state` when given (it must be a JSON
/// object), otherwise the caller's `current` dialog state. Raw prompt
/// text must not be empty.
pub fn build_ask_response(
    prompt: impl Into<AskPrompt>,
    possible_intents: Vec<ExpectedIntent>,
    explicit_state: Option<&Value>,
    current: &DialogState,
) -> Result<AssistantResponse, ConversationError> {
    let input_prompt = match prompt.into() {
        AskPrompt::Built(prompt) => prompt,
        AskPrompt::Text(text) if text.is_empty() => return Err(ConversationError::InvalidText),
        AskPrompt::Text(text) => build_input_prompt(is_ssml(&text), &text, &[])?,
    };

    let conversation_token = match explicit_state {
        Some(Value::Array(_)) => {
            return Err(ConversationError::invalid_dialog_state(
                "dialog state must not be an array",
            ))
        }
        Some(state @ Value::Object(_)) => serde_json::to_string(state)?,
        Some(_) => {
            return Err(ConversationError::invalid_dialog_state(
                "dialog state must be a JSON object",
            ))
        }
        None => dialog_state::encode(current.state.as_ref(), &current.data)?,
    };

    Ok(AssistantResponse::ask(
        conversation_token,
        ExpectedInput {
            input_prompt,
            possible_intents,
        },
    ))
}

/// Builds a "tell" response that ends the conversation.
pub fn build_tell_response(text: &str) -> Result<AssistantResponse, ConversationError> {
    if text.is_empty() {
        return Err(ConversationError::InvalidText);
    }
    Ok(AssistantResponse::tell(Prompt::new(is_ssml(text), text)))
}

/// Builds the expected intent for a permission request.
pub fn build_permission_intent(dialect: Dialect, spec: &PermissionSpec) -> ExpectedIntent {
    let mut intent = ExpectedIntent::named(StandardIntent::Permission.name(dialect));
    match dialect {
        Dialect::Current => {
            let mut data = Map::new();
            data.insert("@type".to_string(), json!(PERMISSION_VALUE_SPEC_TYPE));
            if let Ok(Value::Object(fields)) = serde_json::to_value(spec) {
                data.extend(fields);
            }
            intent.input_value_data = Some(Value::Object(data));
        }
        Dialect::Legacy => {
            intent.input_value_spec = Some(json!({ "permissionValueSpec": spec }));
        }
    }
    intent
}

/// Builds an "ask" response requesting the permissions in `spec`.
pub fn build_permission_request(
    dialect: Dialect,
    spec: &PermissionSpec,
    explicit_state: Option<&Value>,
    current: &DialogState,
) -> Result<AssistantResponse, ConversationError> {
    build_ask_response(
        PERMISSION_PROMPT_PLACEHOLDER,
        vec![build_permission_intent(dialect, spec)],
        explicit_state,
        current,
    )
}
