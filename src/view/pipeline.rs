//! InventoryView: load the active branch's table and derive what is visible.
//!
//! The view owns all mutable viewer state: active branch, table, search query,
//! load state and status line. Loads are tagged with a [`LoadTicket`]; only
//! the newest ticket may update the view, so when a branch switch and an
//! upload reload overlap, a slower, older response is dropped instead of
//! overwriting a newer one.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::auth::AdminGate;
use super::error::{LoadError, UploadFailed};
use super::source::StockSource;
use super::state::{LoadOutcome, LoadState, LoadTicket, ReloadPlan};
use super::upload::Uploader;
use crate::api::UploadResponse;
use crate::branch::BranchId;
use crate::inventory::{
    filter_rows, parse_table, sample_table, total_units, CalamineCodec, InventoryRow,
    InventoryTable, SpreadsheetCodec,
};

/// Wait before reading back a branch that was just uploaded to.
pub const UPLOAD_RELOAD_DELAY: Duration = Duration::from_millis(500);

/// Status shown before the first load finishes.
pub const INITIAL_STATUS: &str = "Showing sample data";

/// Status shown while an upload is in flight.
pub const UPLOADING_STATUS: &str = "Uploading file…";

pub struct InventoryView<S, C = CalamineCodec> {
    source: S,
    codec: C,
    branch: BranchId,
    table: InventoryTable,
    query: String,
    state: LoadState,
    status: String,
    issued: u64,
    reload_delay: Duration,
}

impl<S: StockSource> InventoryView<S, CalamineCodec> {
    /// A view decoding with calamine, not yet loaded.
    pub fn new(source: S, branch: BranchId) -> Self {
        Self::with_codec(source, CalamineCodec, branch)
    }

    /// Create and immediately load `branch`.
    pub async fn mount(source: S, branch: BranchId) -> Self {
        let mut view = Self::new(source, branch);
        view.reload().await;
        view
    }
}

impl<S: StockSource, C: SpreadsheetCodec> InventoryView<S, C> {
    /// A view with a custom codec. Starts `Idle`, showing the sample table.
    pub fn with_codec(source: S, codec: C, branch: BranchId) -> Self {
        Self {
            source,
            codec,
            branch,
            table: sample_table(),
            query: String::new(),
            state: LoadState::Idle,
            status: INITIAL_STATUS.to_string(),
            issued: 0,
            reload_delay: UPLOAD_RELOAD_DELAY,
        }
    }

    /// Override the read-back delay used after uploads to the active branch.
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub fn branch(&self) -> BranchId {
        self.branch
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The whole current table, unfiltered.
    pub fn rows(&self) -> &[InventoryRow] {
        &self.table
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rows matching the current query. Recomputed on every call.
    pub fn visible_rows(&self) -> Vec<&InventoryRow> {
        filter_rows(&self.table, &self.query)
    }

    /// Total units across the current table.
    pub fn total_units(&self) -> u64 {
        total_units(&self.table)
    }

    /// Whether upload affordances may be shown.
    pub fn upload_allowed(&self, gate: &impl AdminGate) -> bool {
        gate.is_authorized()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start a load of the active branch. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            token: self.issued,
            branch: self.branch,
        }
    }

    /// Fetch, decode and normalize for a ticket without touching the view.
    pub async fn fetch(&self, ticket: LoadTicket) -> LoadOutcome {
        let result = match self.source.fetch(ticket.branch).await {
            Ok(Some(bytes)) => parse_table(&self.codec, &bytes).map_err(LoadError::from),
            Ok(None) => Err(LoadError::NotFound),
            Err(e) => Err(LoadError::from(e)),
        };
        outcome_for(ticket, result)
    }

    /// Apply an outcome if its ticket is still the newest one for the active
    /// branch. Returns whether it was applied.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.ticket.token != self.issued || outcome.ticket.branch != self.branch {
            debug!(
                token = outcome.ticket.token,
                latest = self.issued,
                branch = %outcome.ticket.branch,
                "discarding stale load"
            );
            return false;
        }

        if let Some(error) = &outcome.error {
            warn!(branch = %outcome.ticket.branch, state = %outcome.state, "falling back to sample data: {error}");
        } else {
            info!(branch = %outcome.ticket.branch, rows = outcome.rows.len(), "stock table loaded");
        }

        self.state = outcome.state;
        self.table = outcome.rows;
        self.status = outcome.status;
        true
    }

    /// Load the active branch and apply the result.
    pub async fn reload(&mut self) -> LoadState {
        let ticket = self.begin_load();
        let outcome = self.fetch(ticket).await;
        self.apply(outcome);
        self.state
    }

    /// Make `branch` active. Reloads only if it actually changed.
    pub async fn select_branch(&mut self, branch: BranchId) -> LoadState {
        if branch == self.branch {
            return self.state;
        }
        self.branch = branch;
        self.reload().await
    }

    // =========================================================================
    // Uploads
    // =========================================================================

    /// Decide how to refresh after a successful upload to `target`, switching
    /// the active branch if needed.
    pub fn plan_after_upload(&mut self, target: BranchId) -> ReloadPlan {
        if target != self.branch {
            self.branch = target;
            ReloadPlan::Switched(target)
        } else {
            ReloadPlan::ReloadAfterDelay
        }
    }

    /// Refresh after a successful upload to `target`.
    ///
    /// The stored file is read back rather than trusting the bytes that were
    /// just sent.
    pub async fn complete_upload(&mut self, target: BranchId) -> LoadState {
        if self.plan_after_upload(target) == ReloadPlan::ReloadAfterDelay {
            tokio::time::sleep(self.reload_delay).await;
        }
        self.reload().await
    }

    /// The admin upload flow: check the gate, send the file, then refresh.
    ///
    /// Failures end up in [`status`](Self::status) as well as the returned
    /// error; the current table is left untouched.
    pub async fn upload<U: Uploader>(
        &mut self,
        gate: &impl AdminGate,
        uploader: &U,
        file_name: &str,
        bytes: Vec<u8>,
        target: BranchId,
    ) -> Result<UploadResponse, UploadFailed> {
        if !gate.is_authorized() {
            self.status = UploadFailed::Unauthorized.to_string();
            return Err(UploadFailed::Unauthorized);
        }

        self.status = UPLOADING_STATUS.to_string();
        match uploader.upload(target, file_name, bytes).await {
            Ok(response) => {
                // A fallback read-back keeps its own status explaining the sample table.
                if self.complete_upload(response.branch).await == LoadState::Loaded {
                    self.status = format!(
                        "Uploaded {file_name} to {} branch, loaded {} items",
                        response.branch.display_name(),
                        self.table.len()
                    );
                }
                Ok(response)
            }
            Err(e) => {
                warn!(branch = %target, "upload failed: {e}");
                self.status = e.to_string();
                Err(e)
            }
        }
    }
}

/// Turn a load result into the state, table and status it produces.
fn outcome_for(ticket: LoadTicket, result: Result<InventoryTable, LoadError>) -> LoadOutcome {
    let name = ticket.branch.display_name();
    let (state, rows, status, error) = match result {
        Ok(rows) if !rows.is_empty() => {
            let status = format!("Loaded {} items from {name} branch", rows.len());
            (LoadState::Loaded, rows, status, None)
        }
        Ok(_) => (
            LoadState::Empty,
            sample_table(),
            format!("Showing sample data ({name} stock file is empty)"),
            Some(LoadError::Empty),
        ),
        Err(LoadError::NotFound) => (
            LoadState::NotFound,
            sample_table(),
            format!("Showing sample data ({name} stock file not found)"),
            Some(LoadError::NotFound),
        ),
        Err(LoadError::Empty) => (
            LoadState::Empty,
            sample_table(),
            format!("Showing sample data ({name} stock file is empty)"),
            Some(LoadError::Empty),
        ),
        Err(e) => (
            LoadState::Failed,
            sample_table(),
            format!("Showing sample data ({name} branch)"),
            Some(e),
        ),
    };

    LoadOutcome {
        ticket,
        state,
        rows,
        status,
        error,
    }
}
