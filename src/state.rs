//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::MemberStore;
use crate::db::postgres::PgMemberStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned per request
#[derive(Clone)]
pub struct AppState {
    /// Store handle the API surface operates through
    pub store: Arc<dyn MemberStore>,
    /// Shared API token; `None` means the check is delegated upstream
    pub api_token: Option<String>,
}

impl AppState {
    /// Connect to PostgreSQL, run pending migrations, and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            store: Arc::new(PgMemberStore::new(pool)),
            api_token: config.api_token.clone(),
        })
    }

    /// Build state over an arbitrary store implementation
    #[cfg(test)]
    pub fn with_store(store: Arc<dyn MemberStore>, api_token: Option<String>) -> Self {
        Self { store, api_token }
    }
}
