//! Request extractor.
//!
//! Pure reads over a parsed [`RequestBody`]. Each function returns the
//! specific [`ConversationError`] for the first precondition that fails;
//! reporting and degrading to an empty result is the facade's job.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use super::casing::snake_case_keys;
use super::request::{Argument, ConversationStage, Coordinates, Input, RequestBody};
use super::{permission_granted_argument, Dialect};
use crate::domain::foundation::ConversationError;

/// Literal text value of a granted permission argument.
const PERMISSION_GRANTED_VALUE: &str = "true";

/// Value of a named argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// Plain text value, returned verbatim.
    Text(String),
    /// Structured argument rendered in the turn's dialect.
    Structured(Value),
}

impl ArgumentValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgumentValue::Text(text) => Some(text),
            ArgumentValue::Structured(_) => None,
        }
    }
}

/// Display names from the user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Normalized view of the requesting user.
///
/// Serializes the id and access token under both the current and legacy
/// field names so either calling convention keeps working.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    /// Present only when the request carried a profile.
    pub user_name: Option<UserName>,
}

impl Serialize for UserInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("UserInfo", 5)?;
        state.serialize_field("userId", &self.user_id)?;
        state.serialize_field("user_id", &self.user_id)?;
        state.serialize_field("accessToken", &self.access_token)?;
        state.serialize_field("access_token", &self.access_token)?;
        if let Some(name) = &self.user_name {
            state.serialize_field("userName", name)?;
        } else {
            state.skip_field("userName")?;
        }
        state.end()
    }
}

/// Normalized device location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    pub coordinates: Option<Coordinates>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// First element of `inputs`.
pub fn top_input(body: &RequestBody) -> Result<&Input, ConversationError> {
    body.inputs
        .as_deref()
        .and_then(<[Input]>::first)
        .ok_or(ConversationError::MissingInputs)
}

/// Raw query text of the top input.
pub fn raw_input(body: &RequestBody) -> Result<&str, ConversationError> {
    let input = top_input(body)?;
    let raw = input
        .raw_inputs
        .as_deref()
        .and_then(<[_]>::first)
        .ok_or(ConversationError::MissingRawInputs)?;
    match raw.query.as_deref() {
        None => Err(ConversationError::MissingQuery),
        Some("") => Err(ConversationError::EmptyQuery),
        Some(query) => Ok(query),
    }
}

/// Intent of the top input.
pub fn intent(body: &RequestBody) -> Result<&str, ConversationError> {
    let input = top_input(body)?;
    input
        .intent
        .as_deref()
        .filter(|intent| !intent.is_empty())
        .ok_or(ConversationError::MissingIntent)
}

/// All arguments of the top input.
pub fn arguments(body: &RequestBody) -> Result<&[Argument], ConversationError> {
    Ok(top_input(body)?.arguments.as_deref().unwrap_or_default())
}

/// Argument of the top input whose name matches exactly.
pub fn argument<'a>(body: &'a RequestBody, name: &str) -> Result<&'a Argument, ConversationError> {
    if name.is_empty() {
        return Err(ConversationError::InvalidArgumentName);
    }
    arguments(body)?
        .iter()
        .find(|argument| argument.name == name)
        .ok_or_else(|| ConversationError::argument_not_found(name))
}

/// Unwrapped value of a named argument.
///
/// Text values are returned verbatim. Other arguments are returned whole,
/// with snake_case keys in the legacy dialect.
pub fn argument_value(
    body: &RequestBody,
    name: &str,
    dialect: Dialect,
) -> Result<ArgumentValue, ConversationError> {
    let argument = argument(body, name)?;
    if let Some(text) = &argument.text_value {
        return Ok(ArgumentValue::Text(text.clone()));
    }

    let structured = serde_json::to_value(argument)?;
    Ok(ArgumentValue::Structured(match dialect {
        Dialect::Legacy => snake_case_keys(structured),
        Dialect::Current => structured,
    }))
}

/// True iff the permission-granted argument's text value is `"true"`.
pub fn permission_granted(body: &RequestBody, dialect: Dialect) -> Result<bool, ConversationError> {
    let argument = argument(body, permission_granted_argument(dialect))?;
    Ok(argument.text_value.as_deref() == Some(PERMISSION_GRANTED_VALUE))
}

/// Dialog-state token handed back by the platform, if any.
pub fn dialog_state_token(body: &RequestBody) -> Option<&str> {
    body.conversation
        .as_ref()
        .and_then(|conversation| conversation.conversation_token.as_deref())
}

/// Normalized user information.
pub fn user(body: &RequestBody) -> Result<UserInfo, ConversationError> {
    let user = body.user.as_ref().ok_or(ConversationError::MissingUser)?;
    Ok(UserInfo {
        user_id: user.user_id.clone(),
        access_token: user.access_token.clone(),
        user_name: user.profile.as_ref().map(|profile| UserName {
            display_name: profile.display_name.clone(),
            given_name: profile.given_name.clone(),
            family_name: profile.family_name.clone(),
        }),
    })
}

/// Device location, or `None` when the device did not share one.
pub fn device_location(body: &RequestBody) -> Option<DeviceLocation> {
    let location = body.device.as_ref()?.location.as_ref()?;
    Some(DeviceLocation {
        coordinates: location.coordinates,
        address: location.formatted_address.clone(),
        zip_code: location.zip_code.clone(),
        city: location.city.clone(),
    })
}

/// Platform conversation identifier.
pub fn conversation_id(body: &RequestBody) -> Result<&str, ConversationError> {
    body.conversation
        .as_ref()
        .and_then(|conversation| conversation.conversation_id.as_deref())
        .ok_or(ConversationError::MissingConversationId)
}

/// True when the platform marks this turn as the start of a session.
pub fn is_new_conversation(body: &RequestBody) -> bool {
    body.conversation
        .as_ref()
        .and_then(|conversation| conversation.stage.as_ref())
        == Some(&ConversationStage::New)
}
