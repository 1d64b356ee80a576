//! Upload validation: media type and size checks that run before any write.

use crate::branch::BranchId;
use crate::error::UploadError;

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Media type of `.xlsx` workbooks.
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Media type of legacy `.xls` workbooks.
pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";

/// The two spreadsheet media types the store accepts.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = [XLSX_MEDIA_TYPE, XLS_MEDIA_TYPE];

/// Whether a declared media type is one of [`ACCEPTED_MEDIA_TYPES`].
///
/// Parameters such as `; charset=binary` are ignored and the essence is
/// compared case-insensitively.
pub fn is_accepted_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    ACCEPTED_MEDIA_TYPES
        .iter()
        .any(|accepted| essence.eq_ignore_ascii_case(accepted))
}

/// A validated upload, ready to be handed to a [`BranchStore`](super::BranchStore).
///
/// Only constructible through [`Upload::new`], so a store never sees a payload
/// with the wrong media type or above the size ceiling.
#[derive(Debug, Clone)]
pub struct Upload {
    branch: BranchId,
    bytes: Vec<u8>,
}

impl Upload {
    /// Validate the declared media type and the payload size.
    pub fn new(branch: BranchId, bytes: Vec<u8>, media_type: &str) -> Result<Self, UploadError> {
        if !is_accepted_media_type(media_type) {
            return Err(UploadError::UnsupportedMediaType(media_type.to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::PayloadTooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }
        Ok(Self { branch, bytes })
    }

    pub fn branch(&self) -> BranchId {
        self.branch
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
