//! UploadService: the server-side upload pipeline.
//!
//! `resolve → validate → write`, run to completion for each request. The
//! HTTP layer only turns a multipart body into an [`UploadRequest`] and the
//! result back into JSON; everything that decides where bytes land lives
//! here.
//!
//! ## Example
//!
//! ```
//! use stock_viewer::{BranchId, InMemoryBranchStore, UploadService};
//! use stock_viewer::service::{FilePart, UploadRequest};
//! use stock_viewer::store::XLSX_MEDIA_TYPE;
//!
//! let service = UploadService::new(InMemoryBranchStore::new());
//! let response = service
//!     .handle(UploadRequest {
//!         query_branch: Some("hongkong".into()),
//!         field_branch: None,
//!         file: Some(FilePart {
//!             file_name: Some("stock.xlsx".into()),
//!             media_type: XLSX_MEDIA_TYPE.into(),
//!             bytes: vec![1, 2, 3],
//!         }),
//!     })
//!     .unwrap();
//!
//! assert_eq!(response.branch, BranchId::HongKong);
//! assert_eq!(response.path, "/hongkong.xlsx");
//! ```

use tracing::{info, warn};

use crate::api::UploadResponse;
use crate::branch::{resolve_branch, BranchId};
use crate::error::UploadError;
use crate::store::{BranchStore, StoreError, Upload};

/// The `file` part of an upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Name the uploader gave the file. Logged only; never used for storage.
    pub file_name: Option<String>,
    /// Declared media type of the part.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Everything an upload request carries that the pipeline looks at.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// `?branch=` query parameter.
    pub query_branch: Option<String>,
    /// `branch` multipart field.
    pub field_branch: Option<String>,
    pub file: Option<FilePart>,
}

impl UploadRequest {
    /// Branch this request resolves to.
    pub fn branch(&self) -> BranchId {
        resolve_branch(self.query_branch.as_deref(), self.field_branch.as_deref())
    }
}

/// Accepts uploads into a [`BranchStore`].
pub struct UploadService<S> {
    store: S,
}

impl<S: BranchStore> UploadService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run one upload through the pipeline.
    ///
    /// Validation failures never touch the store.
    pub fn handle(&self, request: UploadRequest) -> Result<UploadResponse, UploadError> {
        let branch = request.branch();
        let file = request.file.ok_or(UploadError::MissingFile)?;

        let upload = Upload::new(branch, file.bytes, &file.media_type).inspect_err(|e| {
            warn!(%branch, media_type = %file.media_type, "upload rejected: {e}");
        })?;

        let stored = self.store.save(&upload)?;
        info!(
            %branch,
            original_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
            saved_as = stored.file_name,
            "upload accepted"
        );
        Ok(stored.into())
    }

    /// Current bytes of a branch's file, if any.
    pub fn load(&self, branch: BranchId) -> Result<Option<Vec<u8>>, StoreError> {
        self.store.load(branch)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
