//! Storage error types and their mapping into the core taxonomy.

use thiserror::Error;

use stockroom_core::errors::{DatabaseError, Error as CoreError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Diesel error: {0}")]
    Diesel(#[from] diesel::result::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Writer error: {0}")]
    Writer(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Diesel(e) => {
                CoreError::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::Pool(message) => CoreError::Database(DatabaseError::Pool(message)),
            StorageError::Migration(message) => {
                CoreError::Database(DatabaseError::Migration(message))
            }
            StorageError::Writer(message) => CoreError::Database(DatabaseError::Internal(message)),
        }
    }
}
