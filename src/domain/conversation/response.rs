//! Outbound response envelope.
//!
//! An [`AssistantResponse`] is either an "ask" (the platform keeps the
//! microphone open and returns the dialog-state token next turn) or a
//! "tell" (the turn ends the conversation). The two shapes are only
//! reachable through their constructors, so `expectedInputs` and
//! `finalResponse` are never populated together.

use serde::Serialize;
use serde_json::Value;

/// One rendered prompt: SSML or plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Prompt {
    Ssml {
        ssml: String,
    },
    Text {
        #[serde(rename = "textToSpeech")]
        text_to_speech: String,
    },
}

impl Prompt {
    /// Renders `text` into the SSML or plain-text field.
    pub fn new(is_ssml: bool, text: impl Into<String>) -> Self {
        if is_ssml {
            Prompt::Ssml { ssml: text.into() }
        } else {
            Prompt::Text {
                text_to_speech: text.into(),
            }
        }
    }

    /// The rendered text regardless of kind.
    pub fn text(&self) -> &str {
        match self {
            Prompt::Ssml { ssml } => ssml,
            Prompt::Text { text_to_speech } => text_to_speech,
        }
    }
}

/// Prompts spoken when asking for input and when the user stays silent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPrompt {
    pub initial_prompts: Vec<Prompt>,
    pub no_input_prompts: Vec<Prompt>,
}

/// Intent the platform should expect on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedIntent {
    pub intent: String,

    /// Current-dialect payload, tagged with an `@type` discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value_data: Option<Value>,

    /// Legacy-dialect payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value_spec: Option<Value>,
}

impl ExpectedIntent {
    /// Plain expected intent with no value payload.
    pub fn named(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            input_value_data: None,
            input_value_spec: None,
        }
    }
}

/// Prompt and possible intents for an "ask".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedInput {
    pub input_prompt: InputPrompt,
    pub possible_intents: Vec<ExpectedIntent>,
}

/// Closing speech for a "tell".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResponse {
    pub speech_response: Prompt,
}

/// Response body sent back to the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_token: Option<String>,

    expect_user_response: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    expected_inputs: Option<Vec<ExpectedInput>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    final_response: Option<FinalResponse>,
}

impl AssistantResponse {
    /// "Ask" response carrying the dialog-state token.
    pub(crate) fn ask(conversation_token: String, expected_input: ExpectedInput) -> Self {
        Self {
            conversation_token: Some(conversation_token),
            expect_user_response: true,
            expected_inputs: Some(vec![expected_input]),
            final_response: None,
        }
    }

    /// "Tell" response ending the conversation.
    pub(crate) fn tell(speech_response: Prompt) -> Self {
        Self {
            conversation_token: None,
            expect_user_response: false,
            expected_inputs: None,
            final_response: Some(FinalResponse { speech_response }),
        }
    }

    pub fn conversation_token(&self) -> Option<&str> {
        self.conversation_token.as_deref()
    }

    pub fn expect_user_response(&self) -> bool {
        self.expect_user_response
    }

    pub fn expected_inputs(&self) -> Option<&[ExpectedInput]> {
        self.expected_inputs.as_deref()
    }

    pub fn final_response(&self) -> Option<&FinalResponse> {
        self.final_response.as_ref()
    }
}
