//! Branch resolution for inbound uploads.

use super::BranchId;

/// Decide which branch an upload belongs to.
///
/// The query parameter wins over the multipart `branch` field; a hint that is
/// missing or blank after trimming falls through to the next source, and with
/// no usable hint the default branch is returned. Never fails.
///
/// ```
/// use stock_viewer::{resolve_branch, BranchId};
///
/// assert_eq!(resolve_branch(Some("HongKong"), None), BranchId::HongKong);
/// assert_eq!(resolve_branch(None, Some("dubai")), BranchId::Dubai);
/// assert_eq!(resolve_branch(None, None), BranchId::Dubai);
/// ```
pub fn resolve_branch(query: Option<&str>, field: Option<&str>) -> BranchId {
    let hint = [query, field]
        .into_iter()
        .flatten()
        .map(|raw| raw.trim().to_lowercase())
        .find(|hint| !hint.is_empty());

    match hint {
        Some(hint) => BranchId::ALL
            .into_iter()
            .find(|branch| branch.matches_hint(&hint))
            .unwrap_or_default(),
        None => BranchId::default(),
    }
}
