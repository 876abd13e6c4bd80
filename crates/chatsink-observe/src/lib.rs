//! Observability setup for Chatsink.

pub mod tracing_setup;
