use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

// "Closes #123", "fixed #4", "Resolves #789"
static CLOSING_KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+#(\d+)")
        .unwrap()
});

static PR_TITLE_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(?:\([\w-]+\))?:").unwrap());

/// One merged pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub author: String,
    /// Labels in forge order, case preserved.
    pub labels: Vec<String>,
    pub merged_at: DateTime<Utc>,
    /// Issue numbers referenced with a closing keyword in the body.
    pub closed_issues: Vec<u64>,
}

impl PullRequestRecord {
    /// Case-insensitive label lookup.
    pub fn has_label(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.labels.iter().any(|l| l.to_lowercase() == name)
    }
}

/// Collect issue numbers linked with closing keywords, in body order.
pub fn extract_closed_issues(body: &str) -> Vec<u64> {
    CLOSING_KEYWORD_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Extract the conventional type from a PR title (`feat(ui): ...` ->
/// `feat`). Titles with a `!` marker or without a type return `None`.
pub fn extract_type_from_pr_title(title: &str) -> Option<String> {
    PR_TITLE_TYPE_REGEX
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_closed_issues_with_all_keywords() {
        let body = "Closes #12 and fixes #3.\nAlso resolved #7, see #99";
        assert_eq!(extract_closed_issues(body), vec![12, 3, 7]);
    }

    #[test]
    fn closed_issue_keywords_are_case_insensitive() {
        assert_eq!(extract_closed_issues("FIXED #1\nResolve #2"), vec![1, 2]);
        assert!(extract_closed_issues("no links here").is_empty());
    }

    #[test]
    fn extracts_type_from_conventional_titles() {
        assert_eq!(
            extract_type_from_pr_title("feat: add new feature").as_deref(),
            Some("feat")
        );
        assert_eq!(
            extract_type_from_pr_title("fix(ui): resolve layout issue")
                .as_deref(),
            Some("fix")
        );
        assert_eq!(
            extract_type_from_pr_title("feat(my-component): add feature")
                .as_deref(),
            Some("feat")
        );
    }

    #[test]
    fn rejects_titles_without_type() {
        assert_eq!(extract_type_from_pr_title("feat!: breaking change"), None);
        assert_eq!(extract_type_from_pr_title("Update README"), None);
        assert_eq!(extract_type_from_pr_title("Merge pull request #123"), None);
        assert_eq!(extract_type_from_pr_title("feat add feature"), None);
    }

    #[test]
    fn label_lookup_ignores_case() {
        let pr = PullRequestRecord {
            number: 1,
            title: "t".into(),
            body: None,
            author: "alice".into(),
            labels: vec!["Skip-Changelog".into()],
            merged_at: DateTime::from_timestamp(0, 0).unwrap(),
            closed_issues: vec![],
        };

        assert!(pr.has_label("skip-changelog"));
        assert!(!pr.has_label("skip"));
    }
}
