//! Assistant Webhook - Conversation protocol adapter for assistant platforms
//!
//! This crate turns one inbound assistant-platform webhook turn into a typed
//! view of the request, carries dialog state across turns in the opaque
//! conversation token, and builds the "ask" and "tell" responses in either
//! protocol dialect.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
