use crate::database::create_tables;
use crate::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite ticket database.
///
/// Each unit of work opens its own connection through [`TicketStore::with_session`];
/// the connection is closed when the closure returns, whether it succeeded or not.
/// Writes from this process go through [`TicketStore::with_write_session`], one at a time.
#[derive(Debug, Clone)]
pub struct TicketStore {
    path: Arc<PathBuf>,
    writer: Arc<Mutex<()>>,
}

impl TicketStore {
    /// Ensures the parent directory and the `tickets` table exist, and switches
    /// the file to WAL so readers never block the writer.
    pub fn open(database_url: impl AsRef<Path>) -> Result<Self> {
        let path = database_url.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        create_tables(&conn)?;
        tracing::info!(path = %path.display(), journal_mode = %mode, "ticket store ready");

        Ok(Self {
            path: Arc::new(path),
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `work` against a fresh connection on the blocking pool.
    pub async fn with_session<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(path.as_path())?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            work(&conn)
        })
        .await?
    }

    /// Like [`with_session`](Self::with_session), but holds the store's writer
    /// lock until the connection is closed.
    pub async fn with_write_session<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let conn = Connection::open(path.as_path())?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            work(&conn)
        })
        .await?
    }

    pub async fn ping(&self) -> bool {
        self.with_session(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
        .inspect_err(|e| tracing::warn!("ticket store unavailable: {}", e))
        .is_ok()
    }
}
