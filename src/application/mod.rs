//! Application layer - The per-turn conversation facade.
//!
//! This layer combines the version classifier, request extractor, dialog
//! state codec and response builder behind one adapter, and routes every
//! failure to the error sink port.

mod conversation_adapter;

pub use conversation_adapter::{AdapterOptions, ConversationAdapter, SessionStartHook};
