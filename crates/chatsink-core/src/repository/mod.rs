//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (chatsink-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod chat;
pub mod message;

pub use chat::ChatRepository;
pub use message::MessageRepository;
