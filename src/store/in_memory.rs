//! InMemoryBranchStore - HashMap-backed branch store for testing and embedding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{BranchStore, StoreError, StoredFile, Upload};
use crate::branch::BranchId;

/// In-memory branch store. Clone-friendly via Arc; clones share contents.
#[derive(Clone, Default)]
pub struct InMemoryBranchStore {
    files: Arc<RwLock<HashMap<BranchId, Vec<u8>>>>,
}

impl InMemoryBranchStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of branches that currently hold a file.
    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BranchStore for InMemoryBranchStore {
    fn save(&self, upload: &Upload) -> Result<StoredFile, StoreError> {
        let mut files = self
            .files
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        files.insert(upload.branch(), upload.bytes().to_vec());
        Ok(StoredFile::for_upload(upload))
    }

    fn load(&self, branch: BranchId) -> Result<Option<Vec<u8>>, StoreError> {
        let files = self
            .files
            .read()
            .map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(files.get(&branch).cloned())
    }
}
