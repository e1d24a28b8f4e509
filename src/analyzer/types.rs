//! Shared release-notes data types
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::category::CategorizedChanges;

/// Where a change came from. Exactly one of the two is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChangeSource {
    #[serde(rename = "prNumber")]
    PullRequest(u64),
    #[serde(rename = "commitHash")]
    Commit(String),
}

/// A normalized, category-ready change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(flatten)]
    pub source: ChangeSource,
    pub author: String,
    pub issues: Vec<u64>,
    pub breaking: bool,
}

impl ChangeItem {
    pub fn pr_number(&self) -> Option<u64> {
        match self.source {
            ChangeSource::PullRequest(number) => Some(number),
            ChangeSource::Commit(_) => None,
        }
    }

    pub fn commit_hash(&self) -> Option<&str> {
        match &self.source {
            ChangeSource::Commit(hash) => Some(hash),
            ChangeSource::PullRequest(_) => None,
        }
    }
}

/// Render-ready payload handed to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseData {
    pub version: String,
    /// Release date, already formatted as `YYYY-MM-DD`.
    pub date: String,
    pub changes: CategorizedChanges,
    /// Sorted, deduplicated, bot-free contributor handles.
    pub contributors: Vec<String>,
    pub compare_url: Option<String>,
    pub owner: String,
    pub repo: String,
}

/// A repository tag as listed by the forge (most recent first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub sha: String,
    /// Commit date of the tagged commit, when the forge reported it.
    pub date: Option<DateTime<Utc>>,
}

impl TagInfo {
    /// Find the tag released before `current` by list position.
    ///
    /// Tags are ordered most-recent-first, so the previous tag is the one
    /// right after `current`. When `current` is not in the list yet the
    /// most recent tag is returned.
    pub fn previous<'a>(tags: &'a [TagInfo], current: &str) -> Option<&'a TagInfo> {
        let index = tags
            .iter()
            .position(|t| t.name == current)
            .map_or(0, |i| i + 1);

        tags.get(index)
    }
}
