//! Exclusion filters for commits and pull requests.
//!
//! Commit filters look at the raw subject, so they run before parsing.
use log::*;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::analyzer::{commit::CommitRecord, pull_request::PullRequestRecord};

static CHORE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^chore(\(.*?\))?:").unwrap());

static MERGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^merge (branch|pull request)").unwrap()
});

/// Which commit filters to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitFilterOptions {
    /// Drop `chore:` commits (default: true)
    pub exclude_chore: bool,
    /// Drop "Merge branch" / "Merge pull request" commits (default: false)
    pub exclude_merge: bool,
}

impl Default for CommitFilterOptions {
    fn default() -> Self {
        Self {
            exclude_chore: true,
            exclude_merge: false,
        }
    }
}

pub fn is_chore_commit(commit: &CommitRecord) -> bool {
    CHORE_REGEX.is_match(&commit.subject)
}

pub fn is_merge_commit(commit: &CommitRecord) -> bool {
    MERGE_REGEX.is_match(&commit.subject)
}

pub fn filter_chore_commits(commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let total = commits.len();
    let filtered: Vec<CommitRecord> =
        commits.into_iter().filter(|c| !is_chore_commit(c)).collect();

    let excluded = total - filtered.len();
    if excluded > 0 {
        info!("excluding {excluded} chore commits");
    }

    filtered
}

pub fn filter_merge_commits(commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let total = commits.len();
    let filtered: Vec<CommitRecord> =
        commits.into_iter().filter(|c| !is_merge_commit(c)).collect();

    let excluded = total - filtered.len();
    if excluded > 0 {
        info!("excluding {excluded} merge commits");
    }

    filtered
}

/// True when any PR label matches any exclude label, ignoring case.
pub fn has_exclude_label(
    pr: &PullRequestRecord,
    exclude_labels: &[String],
) -> bool {
    exclude_labels.iter().any(|exclude| pr.has_label(exclude))
}

pub fn filter_prs_by_labels(
    prs: Vec<PullRequestRecord>,
    exclude_labels: &[String],
) -> Vec<PullRequestRecord> {
    if exclude_labels.is_empty() {
        return prs;
    }

    let total = prs.len();
    let filtered: Vec<PullRequestRecord> = prs
        .into_iter()
        .filter(|pr| !has_exclude_label(pr, exclude_labels))
        .collect();

    let excluded = total - filtered.len();
    if excluded > 0 {
        info!(
            "excluding {excluded} PRs with labels: {}",
            exclude_labels.join(", ")
        );
    }

    filtered
}

pub fn apply_commit_filters(
    commits: Vec<CommitRecord>,
    options: CommitFilterOptions,
) -> Vec<CommitRecord> {
    let mut filtered = commits;

    if options.exclude_chore {
        filtered = filter_chore_commits(filtered);
    }

    if options.exclude_merge {
        filtered = filter_merge_commits(filtered);
    }

    filtered
}

pub fn apply_pr_filters(
    prs: Vec<PullRequestRecord>,
    exclude_labels: &[String],
) -> Vec<PullRequestRecord> {
    filter_prs_by_labels(prs, exclude_labels)
}
