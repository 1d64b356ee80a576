use thiserror::Error;

use crate::inventory::DecodeError;
use crate::store::StoreError;

/// Failure to fetch a branch file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status other than 404.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// Reading from a local store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a load ended on the sample table.
///
/// Never shown to the user as an error; the view falls back and reports a
/// status message instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("stock file not found")]
    NotFound,
    #[error("stock file has no valid rows")]
    Empty,
    #[error("stock file could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    #[error("stock file could not be fetched: {0}")]
    Network(#[from] SourceError),
}

/// Failure of an admin upload, surfaced as the view's status message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadFailed {
    #[error("Admin login required to upload")]
    Unauthorized,
    /// The server refused the upload; `message` is its `{error}` text.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Unable to upload file: {0}")]
    Network(String),
}

/// Admin login failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}
