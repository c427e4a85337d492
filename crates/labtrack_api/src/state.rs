//! Shared application state handed to every handler.

use crate::auth::TokenKeys;
use crate::error::ApiError;
use labtrack_core::ServiceResult;
use log::error;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// HTTP-facing settings resolved by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    /// Lets any caller register an admin account once users exist.
    pub allow_admin_signup: bool,
    /// Adds a permissive CORS layer for browser front-ends.
    pub cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_secs: 60 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            allow_admin_signup: false,
            cors: true,
        }
    }
}

pub struct AppContext {
    db: Arc<Mutex<Connection>>,
    pub tokens: TokenKeys,
    pub config: ApiConfig,
}

pub type AppState = Arc<AppContext>;

impl AppContext {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection, config: ApiConfig) -> AppState {
        let tokens = TokenKeys::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        );
        Arc::new(Self {
            db: Arc::new(Mutex::new(conn)),
            tokens,
            config,
        })
    }

    /// Runs one unit of service work against the shared connection on the
    /// blocking pool.
    pub async fn with_conn<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::internal("database lock poisoned"))?;
            work(&conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| {
            error!("event=blocking_task module=api status=error error={err}");
            ApiError::internal("internal server error")
        })?
    }
}
