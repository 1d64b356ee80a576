//! Inventory view: the viewer-side ingestion pipeline.
//!
//! ```ignore
//! use stock_viewer::view::{HttpSource, InventoryView};
//! use stock_viewer::BranchId;
//!
//! let mut view = InventoryView::mount(HttpSource::new("https://stock.example.com"), BranchId::Dubai).await;
//! view.set_query("iphone");
//! for row in view.visible_rows() {
//!     println!("{} {} x{}", row.make, row.model, row.quantity);
//! }
//! view.select_branch(BranchId::HongKong).await;
//! ```

mod auth;
mod error;
mod pipeline;
mod source;
mod state;
mod upload;

pub use auth::{AdminGate, CredentialGate, PublicOnly};
pub use error::{AuthError, LoadError, SourceError, UploadFailed};
pub use pipeline::{InventoryView, INITIAL_STATUS, UPLOADING_STATUS, UPLOAD_RELOAD_DELAY};
pub use source::{StockSource, StoreSource};
pub use state::{LoadOutcome, LoadState, LoadTicket, ReloadPlan};
pub use upload::{media_type_for, Uploader};

#[cfg(feature = "client")]
pub use source::HttpSource;
#[cfg(feature = "client")]
pub use upload::HttpUploader;
