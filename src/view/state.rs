use std::fmt;

use super::error::LoadError;
use crate::branch::BranchId;
use crate::inventory::InventoryTable;

/// Where the view is in its load cycle.
///
/// `Idle → Loading → {Loaded | Empty | NotFound | Failed}`; every terminal
/// state but `Loaded` shows the sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
    NotFound,
    Failed,
}

impl LoadState {
    /// Whether the table on display is the built-in sample.
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadState::Empty | LoadState::NotFound | LoadState::Failed)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Empty => "empty",
            LoadState::NotFound => "not-found",
            LoadState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Identifies one load. Only the most recently issued ticket may update the
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: u64,
    pub branch: BranchId,
}

/// Result of one load, not yet applied to the view.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub state: LoadState,
    pub rows: InventoryTable,
    pub status: String,
    /// Why the load fell back to the sample table, if it did.
    pub error: Option<LoadError>,
}

/// What to do after an upload finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPlan {
    /// The upload targeted another branch; the view switched and must load now.
    Switched(BranchId),
    /// The upload targeted the active branch; read it back after the delay.
    ReloadAfterDelay,
}
