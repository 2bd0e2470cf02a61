//! Connection pool construction, embedded migrations, and the serialized
//! write handle.
//!
//! Reads run on pooled connections; every mutating statement is shipped to a
//! single writer thread owning its own connection, so writers never contend
//! on SQLite's file lock.

use std::sync::Arc;
use std::thread;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;
use tokio::sync::{mpsc, oneshot};

use stockroom_core::errors::{DatabaseError, Error};
use stockroom_core::Result;

use crate::errors::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const CONNECTION_PRAGMAS: &str =
    "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;";

/// Applies the session PRAGMAs to every connection handed out by the pool.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| StorageError::Pool(e.to_string()))?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::Pool(e.to_string())))
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(())
}

type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Cloneable handle to the writer thread. Dropping the last clone shuts the
/// thread down.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<WriteJob>,
}

impl WriteHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        let mut conn = SqliteConnection::establish(database_url).map_err(|e| {
            StorageError::Writer(format!("Failed to open writer connection: {}", e))
        })?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(|e| StorageError::Writer(e.to_string()))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();
        thread::Builder::new()
            .name("stockroom-db-writer".to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    job(&mut conn);
                }
                debug!("Writer thread shutting down");
            })
            .map_err(|e| StorageError::Writer(format!("Failed to spawn writer thread: {}", e)))?;

        Ok(Self { tx })
    }

    /// Runs a fallible statement batch on the writer connection and awaits
    /// its outcome.
    pub async fn exec<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: WriteJob = Box::new(move |conn| {
            let _ = reply_tx.send(f(conn));
        });
        self.tx.send(job).map_err(|_| {
            Error::Database(DatabaseError::Internal("Writer thread is gone".to_string()))
        })?;
        reply_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Writer dropped the reply channel".to_string(),
            ))
        })?
    }
}
