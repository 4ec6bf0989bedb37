//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API
//! handlers. Services are generic over store/client/verifier traits, but
//! AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use synthik_core::chat::service::ChatService;
use synthik_core::identity::BoxIdentityVerifier;
use synthik_core::llm::BoxCompletionClient;
use synthik_infra::identity::HttpIdentityVerifier;
use synthik_infra::llm::OpenAiCompatClient;
use synthik_infra::sqlite::chat::SqliteChatStore;
use synthik_infra::sqlite::pool::{DatabasePool, resolve_data_dir};

use crate::config::ServerConfig;

/// Concrete type alias for the chat service pinned to the SQLite store.
pub type ConcreteChatService = ChatService<SqliteChatStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chats: Arc<ConcreteChatService>,
    pub completions: Arc<BoxCompletionClient>,
    pub identity: Arc<BoxIdentityVerifier>,
    /// Model requested for every completion.
    pub model: String,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let db_url = match config.database_url {
            Some(ref url) => url.clone(),
            None => {
                let data_dir = resolve_data_dir();

                // Ensure data directory exists
                tokio::fs::create_dir_all(&data_dir).await?;

                format!(
                    "sqlite://{}?mode=rwc",
                    data_dir.join("synthik.db").display()
                )
            }
        };
        let db_pool = DatabasePool::new(&db_url).await?;

        let chats = ChatService::new(SqliteChatStore::new(db_pool));

        let completions = BoxCompletionClient::new(OpenAiCompatClient::new(
            "ollama",
            &config.model_base_url,
            &config.model_api_key,
        ));

        let identity = BoxIdentityVerifier::new(HttpIdentityVerifier::new(&config.identity_url));

        Ok(Self {
            chats: Arc::new(chats),
            completions: Arc::new(completions),
            identity: Arc::new(identity),
            model: config.model.clone(),
        })
    }
}
