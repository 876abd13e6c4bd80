//! Infrastructure layer for Chatsink.
//!
//! SQLite implementations of the core repository traits, plus
//! configuration loading from the data directory.

pub mod config;
pub mod sqlite;
