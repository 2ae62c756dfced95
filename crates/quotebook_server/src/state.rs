//! Shared per-process state handed to every handler.

use crate::http::error::ApiError;
use quotebook_core::{with_transaction, MarkdownRenderer};
use rusqlite::{Connection, Transaction};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    pub markdown: MarkdownRenderer,
    pub app_version: u32,
}

impl AppState {
    /// Takes ownership of a migrated connection.
    pub fn new(conn: Connection, app_version: u32) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            markdown: MarkdownRenderer::new(),
            app_version,
        }
    }

    /// Runs `work` as one transaction on the blocking pool.
    ///
    /// The connection lock is held for the whole unit of work and released
    /// before the returned future resolves.
    pub async fn unit_of_work<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T, ApiError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| ApiError::Internal("database connection lock poisoned".to_string()))?;
            with_transaction(&mut guard, work)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("unit of work aborted: {err}")))?
    }
}
