//! FsBranchStore - a directory holding one stock file per branch.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{BranchStore, StoreError, StoredFile, Upload};
use crate::branch::BranchId;

/// Filesystem-backed branch store.
///
/// Files live directly in `dir` under [`BranchId::file_name`]. Writes go to a
/// temporary file in the same directory which is then renamed over the target,
/// so a reader sees either the previous file or the new one.
///
/// `dir` also holds those in-flight `.tmp*` files. Expose branch files through
/// [`BranchStore::load`] only, never by serving `dir` wholesale (e.g. with
/// `ServeDir`).
#[derive(Debug, Clone)]
pub struct FsBranchStore {
    dir: PathBuf,
}

impl FsBranchStore {
    /// Create a store rooted at `dir`. The directory is created lazily on the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute or relative on-disk path of a branch's file.
    pub fn file_path(&self, branch: BranchId) -> PathBuf {
        self.dir.join(branch.file_name())
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }
}

impl BranchStore for FsBranchStore {
    fn save(&self, upload: &Upload) -> Result<StoredFile, StoreError> {
        self.ensure_dir()?;

        let target = self.file_path(upload.branch());
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        tmp.write_all(upload.bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| StoreError::io(&target, e.error))?;

        info!(
            branch = %upload.branch(),
            bytes = upload.bytes().len(),
            path = %target.display(),
            "stored branch file"
        );
        Ok(StoredFile::for_upload(upload))
    }

    fn load(&self, branch: BranchId) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.file_path(branch);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%branch, path = %path.display(), "branch file not uploaded yet");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}
