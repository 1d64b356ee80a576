//! Wire types shared by the upload server and its clients.

use serde::{Deserialize, Serialize};

use crate::branch::BranchId;
use crate::store::StoredFile;

/// Message returned with every successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Body of a successful `POST /upload`.
///
/// ```json
/// {
///   "message": "File uploaded successfully",
///   "filename": "hongkong.xlsx",
///   "path": "/hongkong.xlsx",
///   "branch": "hong-kong"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub path: String,
    pub branch: BranchId,
}

impl From<StoredFile> for UploadResponse {
    fn from(stored: StoredFile) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            filename: stored.file_name.to_string(),
            path: stored.path,
            branch: stored.branch,
        }
    }
}

/// Body of every error response: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
