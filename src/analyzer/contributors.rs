use std::collections::{BTreeMap, BTreeSet};

use crate::analyzer::{
    commit::{CommitRecord, UNKNOWN_AUTHOR},
    pull_request::PullRequestRecord,
};

/// Account name fragments that identify automation accounts.
const BOT_PATTERNS: &[&str] = &[
    "dependabot[bot]",
    "renovate[bot]",
    "github-actions[bot]",
    "greenkeeper[bot]",
    "snyk-bot",
    "codecov-io",
    "allcontributors[bot]",
];

/// Per-author activity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributorStats {
    pub commits: usize,
    pub pull_requests: usize,
}

/// Case-insensitive substring match against known bot accounts.
pub fn is_bot_account(author: &str) -> bool {
    let author = author.to_lowercase();
    BOT_PATTERNS.iter().any(|pattern| author.contains(pattern))
}

fn is_creditable(author: &str) -> bool {
    !author.is_empty() && author != UNKNOWN_AUTHOR && !is_bot_account(author)
}

fn dedup_in_order<'a>(authors: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    authors
        .filter(|a| is_creditable(a))
        .filter(|a| seen.insert(*a))
        .map(|a| a.to_string())
        .collect()
}

/// Distinct, creditable commit authors in first-seen order.
pub fn extract_contributors_from_commits(
    commits: &[CommitRecord],
) -> Vec<String> {
    dedup_in_order(commits.iter().map(|c| c.author.as_str()))
}

/// Distinct, creditable PR authors in first-seen order.
pub fn extract_contributors_from_prs(prs: &[PullRequestRecord]) -> Vec<String> {
    dedup_in_order(prs.iter().map(|p| p.author.as_str()))
}

/// Union any number of contributor lists, drop unknown and bot handles
/// and sort case-insensitively.
pub fn merge_contributors(lists: &[Vec<String>]) -> Vec<String> {
    let unique: BTreeSet<&str> = lists
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|a| is_creditable(a))
        .collect();

    let mut merged: Vec<String> =
        unique.into_iter().map(str::to_string).collect();
    merged.sort_by_key(|a| a.to_lowercase());
    merged
}

fn is_countable(author: &str) -> bool {
    !author.is_empty() && !is_bot_account(author)
}

/// Commit and PR counts per named, non-bot author.
pub fn contributor_stats(
    commits: &[CommitRecord],
    prs: &[PullRequestRecord],
) -> BTreeMap<String, ContributorStats> {
    let mut stats: BTreeMap<String, ContributorStats> = BTreeMap::new();

    for commit in commits.iter().filter(|c| is_countable(&c.author)) {
        stats.entry(commit.author.clone()).or_default().commits += 1;
    }

    for pr in prs.iter().filter(|p| is_countable(&p.author)) {
        stats.entry(pr.author.clone()).or_default().pull_requests += 1;
    }

    stats
}

/// `@a, @b, @c`
pub fn format_contributors(contributors: &[String]) -> String {
    contributors
        .iter()
        .map(|c| format!("@{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_commit, create_test_pr};

    fn commit_by(author: &str) -> CommitRecord {
        let mut commit = create_test_commit("feat: something");
        commit.author = author.into();
        commit
    }

    fn pr_by(number: u64, author: &str) -> PullRequestRecord {
        let mut pr = create_test_pr(number, "something", &[]);
        pr.author = author.into();
        pr
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn bot_detection_is_case_insensitive_substring() {
        assert!(is_bot_account("dependabot[bot]"));
        assert!(is_bot_account("DEPENDABOT[BOT]"));
        assert!(is_bot_account("org-renovate[bot]-mirror"));
        assert!(is_bot_account("snyk-bot"));
        assert!(!is_bot_account("alice"));
        assert!(!is_bot_account("robot-fan"));
    }

    #[test]
    fn commit_contributors_skip_unknown_bots_and_duplicates() {
        let commits = vec![
            commit_by("bob"),
            commit_by("alice"),
            commit_by("unknown"),
            commit_by("bob"),
            commit_by("github-actions[bot]"),
        ];

        assert_eq!(
            extract_contributors_from_commits(&commits),
            strings(&["bob", "alice"])
        );
    }

    #[test]
    fn pr_contributors_skip_bots() {
        let prs = vec![
            pr_by(1, "carol"),
            pr_by(2, "renovate[bot]"),
            pr_by(3, "carol"),
        ];

        assert_eq!(extract_contributors_from_prs(&prs), strings(&["carol"]));
    }

    #[test]
    fn merge_sorts_case_insensitively_and_dedups() {
        let merged = merge_contributors(&[
            strings(&["bob", "Alice", "unknown"]),
            strings(&["carol", "bob", "dependabot[bot]"]),
        ]);

        assert_eq!(merged, strings(&["Alice", "bob", "carol"]));
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_contributors(&[
            strings(&["zed", "Amy", "bob"]),
            strings(&["amy", "Bob"]),
        ]);
        let twice = merge_contributors(&[once.clone()]);

        assert_eq!(once, twice);
        assert!(merge_contributors(&[]).is_empty());
    }

    #[test]
    fn stats_count_commits_and_prs_per_author() {
        let commits = vec![commit_by("alice"), commit_by("alice"), commit_by("bob")];
        let prs = vec![pr_by(1, "alice"), pr_by(2, "dependabot[bot]")];

        let stats = contributor_stats(&commits, &prs);

        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats["alice"],
            ContributorStats {
                commits: 2,
                pull_requests: 1
            }
        );
        assert_eq!(stats["bob"].commits, 1);
        assert!(!stats.contains_key("dependabot[bot]"));
    }

    #[test]
    fn stats_skip_empty_authors() {
        let commits = vec![commit_by(""), commit_by("alice")];
        let prs = vec![pr_by(1, "")];

        let stats = contributor_stats(&commits, &prs);

        assert_eq!(stats.len(), 1);
        assert!(!stats.contains_key(""));
        assert_eq!(stats["alice"].commits, 1);
    }

    #[test]
    fn formats_handles_as_mentions() {
        assert_eq!(
            format_contributors(&strings(&["alice", "bob"])),
            "@alice, @bob"
        );
        assert_eq!(format_contributors(&[]), "");
    }
}
