use thiserror::Error;

use crate::store::StoreError;

/// Error type for the upload pipeline (resolve → validate → write).
///
/// Every variant is terminal for its request; nothing here is retried.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart body had no `file` part.
    #[error("No file uploaded")]
    MissingFile,
    /// The file part declared a media type other than xlsx/xls.
    #[error("Invalid file type ({0}). Only XLSX and XLS files are allowed.")]
    UnsupportedMediaType(String),
    /// The file part exceeded the size ceiling.
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },
    /// The whole request body exceeded the transport limit.
    #[error("Request body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },
    /// The request body could not be read as multipart form data.
    #[error("Malformed upload: {0}")]
    Malformed(String),
    /// Writing the branch file failed.
    #[error("Failed to store upload: {0}")]
    Storage(#[from] StoreError),
    /// The upload task died before finishing.
    #[error("Failed to upload file: {0}")]
    Internal(String),
}

impl UploadError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            UploadError::MissingFile => 400,
            UploadError::UnsupportedMediaType(_) => 400,
            UploadError::PayloadTooLarge { .. } => 413,
            UploadError::BodyTooLarge { .. } => 413,
            UploadError::Malformed(_) => 400,
            UploadError::Storage(_) => 500,
            UploadError::Internal(_) => 500,
        }
    }

    /// Whether this is a caller mistake rather than a server failure.
    pub fn is_validation(&self) -> bool {
        self.status_code() < 500
    }
}
