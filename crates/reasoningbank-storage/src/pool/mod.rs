//! Connection pool: one writer plus optional read connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use reasoningbank_core::errors::RbResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` for in-memory databases: a separate in-memory connection would
    /// be a different database, so reads go through the writer.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer first so the file exists, then the readers. Readers are
    /// opened by the caller after migrations via [`ConnectionPool::attach_readers`].
    pub fn open(path: &Path, busy_timeout_ms: u64) -> RbResult<Self> {
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> RbResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
            db_path: None,
        })
    }

    pub fn attach_readers(&mut self, read_pool_size: usize, busy_timeout_ms: u64) -> RbResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(ReadPool::open(path, read_pool_size, busy_timeout_ms)?);
        }
        Ok(())
    }
}
