//! Domain layer containing protocol logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (error taxonomy, state machine trait)
//! - `conversation` - Request extraction, dialog-state codec, response building

pub mod conversation;
pub mod foundation;
