use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for branch store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating the storage directory, writing or reading a branch file failed.
    #[error("storage I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
