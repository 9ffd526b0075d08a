//! Error types for the conversation protocol adapter.

use std::fmt;
use thiserror::Error;

/// Broad classification of a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Required request structure is absent.
    MissingField,
    /// A caller-supplied value violates a structural constraint.
    MalformedInput,
    /// The dialog-state token could not be decoded.
    Decode,
    /// The turn lifecycle does not permit the operation.
    Lifecycle,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::MissingField => "missing_field",
            ErrorCategory::MalformedInput => "malformed_input",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Lifecycle => "lifecycle",
        };
        write!(f, "{}", s)
    }
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Missing-field errors
    MissingInputs,
    MissingRawInputs,
    MissingQuery,
    EmptyQuery,
    ArgumentNotFound,
    MissingUser,
    MissingConversationId,
    MissingIntent,

    // Malformed-input errors
    InvalidArgumentName,
    InvalidDialogState,
    InvalidNoInputCount,
    InvalidIntent,
    InvalidText,
    InvalidPermissionContext,
    InvalidPermissions,

    // Decode errors
    MalformedRequestBody,
    MalformedDialogStateToken,
    Serialization,

    // Lifecycle errors
    SessionStartFailed,
    AlreadyResponded,
    AdapterFailed,
    TransportFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingInputs => "MISSING_INPUTS",
            ErrorCode::MissingRawInputs => "MISSING_RAW_INPUTS",
            ErrorCode::MissingQuery => "MISSING_QUERY",
            ErrorCode::EmptyQuery => "EMPTY_QUERY",
            ErrorCode::ArgumentNotFound => "ARGUMENT_NOT_FOUND",
            ErrorCode::MissingUser => "MISSING_USER",
            ErrorCode::MissingConversationId => "MISSING_CONVERSATION_ID",
            ErrorCode::MissingIntent => "MISSING_INTENT",
            ErrorCode::InvalidArgumentName => "INVALID_ARGUMENT_NAME",
            ErrorCode::InvalidDialogState => "INVALID_DIALOG_STATE",
            ErrorCode::InvalidNoInputCount => "INVALID_NO_INPUT_COUNT",
            ErrorCode::InvalidIntent => "INVALID_INTENT",
            ErrorCode::InvalidText => "INVALID_TEXT",
            ErrorCode::InvalidPermissionContext => "INVALID_PERMISSION_CONTEXT",
            ErrorCode::InvalidPermissions => "INVALID_PERMISSIONS",
            ErrorCode::MalformedRequestBody => "MALFORMED_REQUEST_BODY",
            ErrorCode::MalformedDialogStateToken => "MALFORMED_DIALOG_STATE_TOKEN",
            ErrorCode::Serialization => "SERIALIZATION_ERROR",
            ErrorCode::SessionStartFailed => "SESSION_START_FAILED",
            ErrorCode::AlreadyResponded => "ALREADY_RESPONDED",
            ErrorCode::AdapterFailed => "ADAPTER_FAILED",
            ErrorCode::TransportFailed => "TRANSPORT_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Every condition the adapter reports through its error sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("Missing inputs from request body")]
    MissingInputs,

    #[error("Missing raw inputs from request body")]
    MissingRawInputs,

    #[error("Missing query for raw input")]
    MissingQuery,

    #[error("Empty query string for raw input")]
    EmptyQuery,

    #[error("Invalid argument name")]
    InvalidArgumentName,

    #[error("Failed to find argument '{name}'")]
    ArgumentNotFound { name: String },

    #[error("No user object")]
    MissingUser,

    #[error("No conversation ID")]
    MissingConversationId,

    #[error("Missing intent from request body")]
    MissingIntent,

    #[error("Invalid dialog state: {reason}")]
    InvalidDialogState { reason: String },

    #[error("Invalid number of no inputs: {count} (at most {max})")]
    InvalidNoInputCount { count: usize, max: usize },

    #[error("Invalid intent")]
    InvalidIntent,

    #[error("Invalid text to speak")]
    InvalidText,

    #[error("Invalid context for permission request")]
    InvalidPermissionContext,

    #[error("Invalid permissions: {reason}")]
    InvalidPermissions { reason: String },

    #[error("Malformed request body: {reason}")]
    MalformedRequestBody { reason: String },

    #[error("Malformed dialog state token: {reason}")]
    MalformedDialogStateToken { reason: String },

    #[error("Failed to serialize response: {reason}")]
    Serialization { reason: String },

    #[error("Session start handler failed: {reason}")]
    SessionStartFailed { reason: String },

    #[error("A response was already sent for this turn")]
    AlreadyResponded,

    #[error("Adapter is in a failed state")]
    AdapterFailed,

    #[error("Transport failed to send response: {reason}")]
    TransportFailed { reason: String },
}

impl ConversationError {
    /// Creates an argument-not-found error.
    pub fn argument_not_found(name: impl Into<String>) -> Self {
        ConversationError::ArgumentNotFound { name: name.into() }
    }

    /// Creates an invalid dialog state error.
    pub fn invalid_dialog_state(reason: impl Into<String>) -> Self {
        ConversationError::InvalidDialogState {
            reason: reason.into(),
        }
    }

    /// Creates an invalid permissions error.
    pub fn invalid_permissions(reason: impl Into<String>) -> Self {
        ConversationError::InvalidPermissions {
            reason: reason.into(),
        }
    }

    /// Creates a malformed token error.
    pub fn malformed_token(reason: impl Into<String>) -> Self {
        ConversationError::MalformedDialogStateToken {
            reason: reason.into(),
        }
    }

    /// Creates a malformed request body error.
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        ConversationError::MalformedRequestBody {
            reason: reason.into(),
        }
    }

    /// Creates a session start failure error.
    pub fn session_start_failed(reason: impl Into<String>) -> Self {
        ConversationError::SessionStartFailed {
            reason: reason.into(),
        }
    }

    /// Creates a transport failure error.
    pub fn transport(reason: impl Into<String>) -> Self {
        ConversationError::TransportFailed {
            reason: reason.into(),
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversationError::MissingInputs => ErrorCode::MissingInputs,
            ConversationError::MissingRawInputs => ErrorCode::MissingRawInputs,
            ConversationError::MissingQuery => ErrorCode::MissingQuery,
            ConversationError::EmptyQuery => ErrorCode::EmptyQuery,
            ConversationError::InvalidArgumentName => ErrorCode::InvalidArgumentName,
            ConversationError::ArgumentNotFound { .. } => ErrorCode::ArgumentNotFound,
            ConversationError::MissingUser => ErrorCode::MissingUser,
            ConversationError::MissingConversationId => ErrorCode::MissingConversationId,
            ConversationError::MissingIntent => ErrorCode::MissingIntent,
            ConversationError::InvalidDialogState { .. } => ErrorCode::InvalidDialogState,
            ConversationError::InvalidNoInputCount { .. } => ErrorCode::InvalidNoInputCount,
            ConversationError::InvalidIntent => ErrorCode::InvalidIntent,
            ConversationError::InvalidText => ErrorCode::InvalidText,
            ConversationError::InvalidPermissionContext => ErrorCode::InvalidPermissionContext,
            ConversationError::InvalidPermissions { .. } => ErrorCode::InvalidPermissions,
            ConversationError::MalformedRequestBody { .. } => ErrorCode::MalformedRequestBody,
            ConversationError::MalformedDialogStateToken { .. } => {
                ErrorCode::MalformedDialogStateToken
            }
            ConversationError::Serialization { .. } => ErrorCode::Serialization,
            ConversationError::SessionStartFailed { .. } => ErrorCode::SessionStartFailed,
            ConversationError::AlreadyResponded => ErrorCode::AlreadyResponded,
            ConversationError::AdapterFailed => ErrorCode::AdapterFailed,
            ConversationError::TransportFailed { .. } => ErrorCode::TransportFailed,
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConversationError::MissingInputs
            | ConversationError::MissingRawInputs
            | ConversationError::MissingQuery
            | ConversationError::EmptyQuery
            | ConversationError::ArgumentNotFound { .. }
            | ConversationError::MissingUser
            | ConversationError::MissingConversationId
            | ConversationError::MissingIntent => ErrorCategory::MissingField,

            ConversationError::InvalidArgumentName
            | ConversationError::InvalidDialogState { .. }
            | ConversationError::InvalidNoInputCount { .. }
            | ConversationError::InvalidIntent
            | ConversationError::InvalidText
            | ConversationError::InvalidPermissionContext
            | ConversationError::InvalidPermissions { .. } => ErrorCategory::MalformedInput,

            ConversationError::MalformedRequestBody { .. }
            | ConversationError::MalformedDialogStateToken { .. }
            | ConversationError::Serialization { .. } => ErrorCategory::Decode,

            ConversationError::SessionStartFailed { .. }
            | ConversationError::AlreadyResponded
            | ConversationError::AdapterFailed
            | ConversationError::TransportFailed { .. } => ErrorCategory::Lifecycle,
        }
    }
}

impl From<serde_json::Error> for ConversationError {
    fn from(err: serde_json::Error) -> Self {
        ConversationError::Serialization {
            reason: err.to_string(),
        }
    }
}
