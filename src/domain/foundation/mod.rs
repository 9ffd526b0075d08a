//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy and the lifecycle state machine trait
//! used throughout the adapter.

mod errors;
mod state_machine;

pub use errors::{ConversationError, ErrorCategory, ErrorCode};
pub use state_machine::{StateMachine, TransitionError};
