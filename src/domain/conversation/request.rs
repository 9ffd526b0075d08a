//! Inbound webhook request body.
//!
//! These types mirror the JSON the assistant platform posts on every turn.
//! Every field is optional so that a partial body always parses; presence
//! rules are enforced by the extractor, not by deserialization. Legacy
//! (snake_case) field spellings are accepted through aliases.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ConversationError;

/// Parsed request body for one turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub conversation: Option<Conversation>,
    pub inputs: Option<Vec<Input>>,
    pub user: Option<User>,
    pub device: Option<Device>,
}

impl RequestBody {
    /// Parses each top-level section on its own.
    ///
    /// A section that does not fit its shape is left unset and its error is
    /// returned alongside the body, so the remaining sections stay usable.
    pub fn from_sections(body: Value) -> (Self, Vec<ConversationError>) {
        let mut errors = Vec::new();
        let Value::Object(mut sections) = body else {
            errors.push(ConversationError::malformed_body(
                "request body is not a JSON object",
            ));
            return (Self::default(), errors);
        };

        let parsed = Self {
            conversation: section(&mut sections, "conversation", &mut errors),
            inputs: section(&mut sections, "inputs", &mut errors),
            user: section(&mut sections, "user", &mut errors),
            device: section(&mut sections, "device", &mut errors),
        };
        (parsed, errors)
    }
}

fn section<T: DeserializeOwned>(
    sections: &mut Map<String, Value>,
    name: &str,
    errors: &mut Vec<ConversationError>,
) -> Option<T> {
    let value = sections.remove(name).filter(|value| !value.is_null())?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.push(ConversationError::malformed_body(format!("{name}: {e}")));
            None
        }
    }
}

/// Conversation metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(alias = "conversation_id")]
    pub conversation_id: Option<String>,

    #[serde(rename = "type")]
    pub stage: Option<ConversationStage>,

    #[serde(alias = "conversation_token")]
    pub conversation_token: Option<String>,
}

/// Stage of the conversation as reported by the platform.
///
/// The legacy dialect sends numeric codes, the current one sends names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationStage {
    New,
    Active,
    Unspecified,
}

impl<'de> Deserialize<'de> for ConversationStage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u64),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Code(1) => ConversationStage::New,
            Raw::Code(2) => ConversationStage::Active,
            Raw::Name(name) if name == "NEW" => ConversationStage::New,
            Raw::Name(name) if name == "ACTIVE" => ConversationStage::Active,
            _ => ConversationStage::Unspecified,
        })
    }
}

/// One user input for the turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub intent: Option<String>,

    #[serde(alias = "raw_inputs")]
    pub raw_inputs: Option<Vec<RawInput>>,

    pub arguments: Option<Vec<Argument>>,
}

/// Raw user utterance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub query: Option<String>,

    #[serde(alias = "input_type")]
    pub input_type: Option<Value>,
}

/// Named value attached to an input.
///
/// Fields beyond the text value (structured values, extensions) are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    #[serde(default)]
    pub name: String,

    #[serde(alias = "raw_text", skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(alias = "text_value", skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,

    pub profile: Option<Profile>,

    #[serde(alias = "access_token")]
    pub access_token: Option<String>,
}

/// User profile names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "display_name")]
    pub display_name: Option<String>,

    #[serde(alias = "given_name")]
    pub given_name: Option<String>,

    #[serde(alias = "family_name")]
    pub family_name: Option<String>,
}

/// Device metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Device {
    pub location: Option<Location>,
}

/// Device location as sent by the platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub coordinates: Option<Coordinates>,

    #[serde(alias = "formatted_address")]
    pub formatted_address: Option<String>,

    #[serde(alias = "zip_code")]
    pub zip_code: Option<String>,

    pub city: Option<String>,
}

/// Latitude/longitude pair. Either half may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
