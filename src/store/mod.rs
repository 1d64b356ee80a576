//! Branch store: one file per branch, always overwritten.
//!
//! There is no history, no merge and no locking: a successful
//! [`BranchStore::save`] replaces whatever the branch held before, and two
//! racing saves for the same branch end with the later one on disk.

mod error;
mod fs;
mod in_memory;
mod upload;

use serde::Serialize;

use crate::branch::BranchId;

pub use error::StoreError;
pub use fs::FsBranchStore;
pub use in_memory::InMemoryBranchStore;
pub use upload::{
    is_accepted_media_type, Upload, ACCEPTED_MEDIA_TYPES, MAX_UPLOAD_BYTES, XLSX_MEDIA_TYPE,
    XLS_MEDIA_TYPE,
};

/// Where a branch's stock file ended up after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub branch: BranchId,
    /// Fixed filename derived from the branch.
    pub file_name: &'static str,
    /// Public path the file is fetchable at.
    pub path: String,
    /// Number of bytes written.
    pub len: usize,
}

impl StoredFile {
    pub(crate) fn for_upload(upload: &Upload) -> Self {
        let branch = upload.branch();
        Self {
            branch,
            file_name: branch.file_name(),
            path: branch.public_path(),
            len: upload.bytes().len(),
        }
    }
}

/// Persistent storage for branch stock files.
///
/// Implementations are blocking; async callers should go through
/// `spawn_blocking` for anything that touches disk.
pub trait BranchStore: Send + Sync {
    /// Overwrite the branch's file with the upload's bytes.
    fn save(&self, upload: &Upload) -> Result<StoredFile, StoreError>;

    /// Read the branch's current file. `Ok(None)` if it was never uploaded.
    fn load(&self, branch: BranchId) -> Result<Option<Vec<u8>>, StoreError>;
}

impl<S: BranchStore + ?Sized> BranchStore for std::sync::Arc<S> {
    fn save(&self, upload: &Upload) -> Result<StoredFile, StoreError> {
        (**self).save(upload)
    }

    fn load(&self, branch: BranchId) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(branch)
    }
}
