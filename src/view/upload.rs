//! Upload clients: how the viewer hands a spreadsheet to the upload endpoint.

use std::future::Future;

use super::error::UploadFailed;
use crate::api::UploadResponse;
use crate::branch::BranchId;
use crate::store::{XLSX_MEDIA_TYPE, XLS_MEDIA_TYPE};

/// Sends a spreadsheet to be stored for a branch.
pub trait Uploader: Send + Sync {
    fn upload(
        &self,
        branch: BranchId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<UploadResponse, UploadFailed>> + Send;
}

/// Media type to declare for a file, from its extension.
pub fn media_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".xlsx") {
        XLSX_MEDIA_TYPE
    } else if lower.ends_with(".xls") {
        XLS_MEDIA_TYPE
    } else {
        "application/octet-stream"
    }
}

#[cfg(feature = "client")]
pub use http_uploader::HttpUploader;

#[cfg(feature = "client")]
mod http_uploader {
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;
    use tracing::{debug, warn};

    use super::{media_type_for, BranchId, UploadFailed, UploadResponse, Uploader};
    use crate::api::ErrorBody;

    /// Posts `multipart/form-data` to the upload endpoint.
    ///
    /// The branch goes both in the `branch` field and the `?branch=` query
    /// parameter, so either resolution path on the server sees it.
    #[derive(Debug, Clone)]
    pub struct HttpUploader {
        client: Client,
        upload_url: String,
    }

    impl HttpUploader {
        pub fn new(upload_url: impl Into<String>) -> Self {
            Self::with_client(Client::new(), upload_url)
        }

        pub fn with_client(client: Client, upload_url: impl Into<String>) -> Self {
            Self {
                client,
                upload_url: upload_url.into(),
            }
        }
    }

    impl Uploader for HttpUploader {
        async fn upload(
            &self,
            branch: BranchId,
            file_name: &str,
            bytes: Vec<u8>,
        ) -> Result<UploadResponse, UploadFailed> {
            let part = Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str(media_type_for(file_name))
                .map_err(|e| UploadFailed::Network(e.to_string()))?;
            let form = Form::new()
                .part("file", part)
                .text("branch", branch.id());

            debug!(%branch, url = %self.upload_url, "uploading stock file");
            let response = self
                .client
                .post(&self.upload_url)
                .query(&[("branch", branch.id())])
                .multipart(form)
                .send()
                .await
                .map_err(|e| UploadFailed::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.error)
                    .unwrap_or_else(|_| "Upload failed".to_string());
                warn!(%branch, status = status.as_u16(), "upload rejected: {message}");
                return Err(UploadFailed::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            response
                .json::<UploadResponse>()
                .await
                .map_err(|e| UploadFailed::Network(e.to_string()))
        }
    }
}
