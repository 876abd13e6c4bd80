//! REST API application layer for Chatsink.
//!
//! Exposed as a library so integration tests can build the router against
//! an in-process state; the `chatsink` binary is a thin wrapper.

pub mod http;
pub mod state;
