//! Shared domain types for Chatsink.
//!
//! Chats, messages, normalized content parts, wire DTOs for the ingestion
//! API, the error taxonomy, and configuration types. This crate has no IO
//! and no dependency on any other workspace crate.

pub mod chat;
pub mod config;
pub mod error;
pub mod ingest;
pub mod message;
