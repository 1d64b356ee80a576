//! Stock sources: where the view fetches a branch's stored file from.

use std::future::Future;

use super::error::SourceError;
use crate::branch::BranchId;
use crate::store::BranchStore;

/// Fetches the current stock file of a branch.
///
/// `Ok(None)` means the branch has no file yet; errors are transport
/// failures. No timeout is applied here.
pub trait StockSource: Send + Sync {
    fn fetch(
        &self,
        branch: BranchId,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, SourceError>> + Send;
}

/// Reads straight from a [`BranchStore`] in the same process.
///
/// Branch files are single small spreadsheets, so the read happens inline.
#[derive(Debug, Clone)]
pub struct StoreSource<S> {
    store: S,
}

impl<S: BranchStore> StoreSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: BranchStore> StockSource for StoreSource<S> {
    async fn fetch(&self, branch: BranchId) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(self.store.load(branch)?)
    }
}

#[cfg(feature = "client")]
pub use http_source::HttpSource;

#[cfg(feature = "client")]
mod http_source {
    use reqwest::{Client, StatusCode};
    use tracing::debug;

    use super::{BranchId, SourceError, StockSource};

    /// Fetches `<base_url>/<branch file>` over HTTP.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        client: Client,
        base_url: String,
    }

    impl HttpSource {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self::with_client(Client::new(), base_url)
        }

        pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
            let base_url = base_url.into().trim_end_matches('/').to_string();
            Self { client, base_url }
        }

        /// URL a branch's file is fetched from.
        pub fn url_for(&self, branch: BranchId) -> String {
            format!("{}{}", self.base_url, branch.public_path())
        }
    }

    impl StockSource for HttpSource {
        async fn fetch(&self, branch: BranchId) -> Result<Option<Vec<u8>>, SourceError> {
            let url = self.url_for(branch);
            debug!(%branch, %url, "fetching stock file");

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| SourceError::Network(e.to_string()))?;

            match response.status() {
                StatusCode::NOT_FOUND => Ok(None),
                status if status.is_success() => {
                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|e| SourceError::Network(e.to_string()))?;
                    Ok(Some(bytes.to_vec()))
                }
                status => Err(SourceError::Status(status.as_u16())),
            }
        }
    }

}
