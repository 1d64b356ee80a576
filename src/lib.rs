//! Per-branch phone stock: an overwrite-only spreadsheet upload service and
//! the viewer pipeline that reads it back.
//!
//! - [`branch`]: the fixed branch set and upload-hint resolution.
//! - [`store`]: one file per branch, always overwritten.
//! - [`service`]: the upload pipeline: resolve → validate → write.
//! - [`inventory`]: spreadsheet decoding, row normalization and filtering.
//! - [`view`]: the viewer state machine: fetch, fall back, filter, reload.
//! - `http`: axum transport for the upload service (`server` feature).

pub mod api;
pub mod branch;
pub mod config;
mod error;
pub mod inventory;
pub mod service;
pub mod store;
pub mod view;

#[cfg(feature = "server")]
pub mod http;

pub use api::{ErrorBody, HealthResponse, UploadResponse};
pub use branch::{resolve_branch, BranchId};
pub use config::{ClientConfig, ConfigError, ServerConfig};
pub use error::UploadError;
pub use inventory::{filter_rows, normalize, InventoryRow, InventoryTable};
pub use service::UploadService;
pub use store::{BranchStore, FsBranchStore, InMemoryBranchStore, StoreError, StoredFile, Upload};
pub use view::{InventoryView, LoadState};
