//! Application configuration.
//!
//! Deserialized from `{data_dir}/config.toml`; every field has a default
//! so a missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder principal used as chat owner until real auth exists.
const DEFAULT_OWNER_ID: &str = "97569089-e110-4cae-b4f4-9c02cf5074e4";

/// What happens to already-completed item writes when a sibling in the
/// same batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitPolicy {
    /// Items run concurrently; completed writes persist even when the
    /// aggregate fails. Matches the reference behavior.
    Partial,
    /// The whole batch is written inside one transaction; any failure
    /// rolls everything back.
    Atomic,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        CommitPolicy::Partial
    }
}

/// Global configuration for the ingestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Owner assigned to auto-provisioned chats.
    pub default_owner_id: Uuid,
    /// Title assigned to auto-provisioned chats.
    pub default_chat_title: String,
    /// Base URL used to build the chat reference locator in responses.
    pub public_base_url: String,
    /// Batch failure/atomicity policy.
    pub commit_policy: CommitPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_owner_id: Uuid::parse_str(DEFAULT_OWNER_ID)
                .unwrap_or_else(|_| Uuid::nil()),
            default_chat_title: "Chat Title".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            commit_policy: CommitPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Reference locator for a chat.
    pub fn chat_url(&self, chat_id: &Uuid) -> String {
        format!("{}/chat/{chat_id}", self.public_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_chat_title, "Chat Title");
        assert_eq!(config.commit_policy, CommitPolicy::Partial);
        assert_eq!(config.default_owner_id.to_string(), DEFAULT_OWNER_ID);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("commit_policy = \"atomic\"").unwrap();
        assert_eq!(config.commit_policy, CommitPolicy::Atomic);
        assert_eq!(config.default_chat_title, "Chat Title");
    }

    #[test]
    fn test_chat_url_trims_trailing_slash() {
        let config = AppConfig {
            public_base_url: "http://example.com/".to_string(),
            ..AppConfig::default()
        };
        let id = Uuid::new_v4();
        assert_eq!(config.chat_url(&id), format!("http://example.com/chat/{id}"));
    }
}
