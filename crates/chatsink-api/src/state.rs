//! Application state wiring the ingestion service to its SQLite backends.
//!
//! The service is generic over repository traits; AppState pins it to the
//! concrete infra implementations.

use std::path::Path;
use std::sync::Arc;

use chatsink_core::ingest::IngestService;
use chatsink_infra::config::load_config;
use chatsink_infra::sqlite::chat::SqliteChatRepository;
use chatsink_infra::sqlite::message::SqliteMessageRepository;
use chatsink_infra::sqlite::pool::DatabasePool;
use chatsink_types::config::AppConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteIngestService = IngestService<SqliteChatRepository, SqliteMessageRepository>;

/// Shared application state holding the ingestion service and repositories.
#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<ConcreteIngestService>,
    pub chat_repo: Arc<SqliteChatRepository>,
    pub message_repo: Arc<SqliteMessageRepository>,
    pub config: AppConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database (running migrations), wire the repositories and service.
    pub async fn init(data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let config = load_config(data_dir).await;

        let database_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("chatsink.db").display()
        );
        let db_pool = DatabasePool::new(&database_url).await?;

        let ingest_service = Arc::new(IngestService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            config.clone(),
        ));

        Ok(Self {
            ingest_service,
            chat_repo: Arc::new(SqliteChatRepository::new(db_pool.clone())),
            message_repo: Arc::new(SqliteMessageRepository::new(db_pool.clone())),
            config,
            db_pool,
        })
    }
}
