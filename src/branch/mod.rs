//! Branches: the fixed set of inventory locations.
//!
//! Each branch owns exactly one stock file. Everything that touches storage or
//! fetching derives its filename and public path from the [`BranchId`] alone,
//! never from what the uploader called the file.

mod resolver;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use resolver::resolve_branch;

/// One of the fixed inventory locations.
///
/// `Dubai` is the primary branch and the fallback for anything that does not
/// resolve to another branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BranchId {
    #[default]
    #[serde(rename = "dubai")]
    Dubai,
    #[serde(rename = "hong-kong")]
    HongKong,
}

impl BranchId {
    /// All branches, primary first.
    pub const ALL: [BranchId; 2] = [BranchId::Dubai, BranchId::HongKong];

    /// Canonical identifier, as sent over the wire (`"dubai"`, `"hong-kong"`).
    pub fn id(&self) -> &'static str {
        match self {
            BranchId::Dubai => "dubai",
            BranchId::HongKong => "hong-kong",
        }
    }

    /// Human-readable name used in status messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            BranchId::Dubai => "Dubai",
            BranchId::HongKong => "Hong Kong",
        }
    }

    /// Fixed stock filename for this branch.
    pub fn file_name(&self) -> &'static str {
        match self {
            BranchId::Dubai => "dubai.xlsx",
            BranchId::HongKong => "hongkong.xlsx",
        }
    }

    /// Path under which the stock file is publicly fetchable.
    pub fn public_path(&self) -> String {
        format!("/{}", self.file_name())
    }

    /// Alternative spellings accepted for this branch, besides [`id`](Self::id).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            BranchId::Dubai => &[],
            BranchId::HongKong => &["hong kong", "hongkong", "hong_kong"],
        }
    }

    /// Substring that is enough on its own to select this branch.
    ///
    /// Only non-default branches have one. This is lenient on purpose and
    /// fragile: a future branch whose name contains `"hong"` would collide.
    pub fn core_token(&self) -> Option<&'static str> {
        match self {
            BranchId::Dubai => None,
            BranchId::HongKong => Some("hong"),
        }
    }

    /// Whether an already trimmed, lowercased hint selects this branch.
    pub fn matches_hint(&self, hint: &str) -> bool {
        hint == self.id()
            || self.aliases().contains(&hint)
            || self.core_token().is_some_and(|token| hint.contains(token))
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when strictly parsing an unknown branch name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown branch: {0}")]
pub struct UnknownBranch(pub String);

/// Strict parse: canonical id or alias only, case-insensitive.
///
/// Upload requests go through [`resolve_branch`] instead, which never fails.
impl FromStr for BranchId {
    type Err = UnknownBranch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hint = s.trim().to_lowercase();
        BranchId::ALL
            .into_iter()
            .find(|branch| hint == branch.id() || branch.aliases().contains(&hint.as_str()))
            .ok_or_else(|| UnknownBranch(s.to_string()))
    }
}
