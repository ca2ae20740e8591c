//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use aopminer_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Sequence for unique shared-cache in-memory database names, so two
/// managers in one process never alias each other.
static MEM_DB_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Manages the single write connection and the read connection pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: ReadPool,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_pool_size(path, ReadPool::default_size())
    }

    /// Open a database with an explicit read-pool size.
    pub fn open_with_pool_size(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, pool_size)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    ///
    /// Uses a uniquely named shared-cache database so the read pool sees
    /// the writer's data; pool size is 1.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let seq = MEM_DB_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:aopminer-mem-{seq}?mode=memory&cache=shared");

        let writer = Connection::open_with_flags(
            &uri,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        // WAL does not apply to in-memory databases; only enforce keys.
        writer
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open_shared_memory(&uri, 1)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation with a pooled read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        self.readers.with_conn(f)
    }

    /// Run a WAL checkpoint (TRUNCATE mode) after a batch completes.
    /// No-op for in-memory databases, which have no WAL.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        if self.path.is_none() {
            return Ok(());
        }
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of read connections in the pool.
    pub fn read_pool_size(&self) -> usize {
        self.readers.size()
    }
}
