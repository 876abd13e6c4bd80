//! Ingestion pipeline and repository trait definitions for Chatsink.
//!
//! This crate defines the "ports" (repository traits) that the
//! infrastructure layer implements. It depends only on `chatsink-types` --
//! never on `chatsink-infra` or any database/IO crate.
//!
//! Pipeline: [`validate`] -> [`normalize`] (per item) -> [`ingest`]
//! (provision the chat once, then fan out the per-item upserts).

pub mod ingest;
pub mod normalize;
pub mod repository;
pub mod validate;
