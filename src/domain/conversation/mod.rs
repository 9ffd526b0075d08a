//! Conversation protocol domain module.
//!
//! Reads typed fields out of the platform's webhook request, round-trips
//! the dialog-state token, and builds the "ask" and "tell" response
//! envelopes in the dialect in effect for the turn.

mod builder;
mod builtins;
mod casing;
mod dialect;
mod permission;
mod request;
mod response;
mod turn;

pub mod dialog_state;
pub mod extractor;

pub use builder::{
    build_ask_response, build_expected_intent, build_input_prompt, build_permission_intent,
    build_permission_request, build_tell_response, is_ssml, AskPrompt, MAX_NO_INPUT_PROMPTS,
    PERMISSION_PROMPT_PLACEHOLDER,
};
pub use builtins::{permission_granted_argument, StandardIntent};
pub use casing::{snake_case_keys, to_snake_case};
pub use dialect::{
    classify, ApiVersion, Dialect, ACTIONS_API_VERSION_HEADER, AGENT_VERSION_LABEL_HEADER,
    ASSISTANT_API_VERSION_HEADER,
};
pub use dialog_state::{DialogState, NamedState, State};
pub use extractor::{ArgumentValue, DeviceLocation, UserInfo, UserName};
pub use permission::{Permission, PermissionSpec, PERMISSION_VALUE_SPEC_TYPE};
pub use request::{
    Argument, Conversation, ConversationStage, Coordinates, Device, Input, Location, Profile,
    RawInput, RequestBody, User,
};
pub use response::{
    AssistantResponse, ExpectedInput, ExpectedIntent, FinalResponse, InputPrompt, Prompt,
};
pub use turn::TurnPhase;
