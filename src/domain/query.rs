use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string from the presentation layer does not name a valid
/// enumerant. The caller keeps its previous value; nothing reaches the engine.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind}: {value:?}")]
pub struct InvalidQueryValue {
    kind: &'static str,
    value: String,
}

/// Status dimension of the list query. `All` disables status filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Success,
    Failed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Failed,
        StatusFilter::Pending,
        StatusFilter::Success,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Failed => "Failed only",
            StatusFilter::Pending => "Pending only",
            StatusFilter::Success => "Success only",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Success => "success",
            StatusFilter::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl FromStr for StatusFilter {
    type Err = InvalidQueryValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "success" => Ok(StatusFilter::Success),
            "failed" => Ok(StatusFilter::Failed),
            other => Err(InvalidQueryValue {
                kind: "status filter",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort dimension of the list query, by transaction creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Newest, SortOrder::Oldest];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = InvalidQueryValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(InvalidQueryValue {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

/// Immutable snapshot of the desired list query.
///
/// The engine clones a fresh snapshot into every fetch; equality is value
/// equality, and the search text is always stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionsQuery {
    pub status: StatusFilter,
    pub search: String,
    pub sort: SortOrder,
}
