use chrono::{DateTime, Utc};
use git_conventional::Commit as ConventionalCommit;
use regex::Regex;
use std::sync::LazyLock;

/// Author sentinel used when the forge reports no login or name.
pub const UNKNOWN_AUTHOR: &str = "unknown";

static CONVENTIONAL_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\([\w-]+\))?!?:\s.+").unwrap()
});

// A breaking note on any body line, not only in a trailing footer block.
static BREAKING_NOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^BREAKING[ -]CHANGE:").unwrap());

/// One commit between two release tags.
///
/// Created raw by the forge (`kind` empty, `subject` the full first line)
/// and replaced by [`parse_commit`] with the conventional-commit fields
/// filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub kind: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub breaking: bool,
    /// Short commit hash.
    pub hash: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

impl CommitRecord {
    /// Build an unparsed record from a full commit message.
    pub fn from_message(
        hash: &str,
        message: &str,
        author: Option<&str>,
        date: DateTime<Utc>,
    ) -> Self {
        let (subject, body) = match message.split_once('\n') {
            Some((subject, rest)) => (subject, rest.trim()),
            None => (message, ""),
        };

        Self {
            kind: String::new(),
            scope: None,
            subject: subject.to_string(),
            body: (!body.is_empty()).then(|| body.to_string()),
            breaking: false,
            hash: hash.to_string(),
            author: author
                .filter(|a| !a.is_empty())
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            date,
        }
    }

    /// Subject and body joined back into a full message.
    fn full_message(&self) -> String {
        match &self.body {
            Some(body) if !body.is_empty() => {
                format!("{}\n\n{}", self.subject, body)
            }
            _ => self.subject.clone(),
        }
    }
}

/// Parse a commit against the Conventional Commits grammar.
///
/// Returns a new record with type, scope, description and body taken from
/// the message. Messages that do not follow the grammar come back
/// unchanged, so they keep an empty type and later land in "other".
///
/// A commit is breaking when it has a `BREAKING CHANGE` note on any body
/// line, a `!` before the header colon, or when its raw subject contains
/// `!:` anywhere.
pub fn parse_commit(commit: &CommitRecord) -> CommitRecord {
    let message = commit.full_message();

    match ConventionalCommit::parse(message.trim_end()) {
        Ok(cc) => CommitRecord {
            kind: cc.type_().to_string(),
            scope: cc.scope().map(|s| s.to_string()),
            subject: cc.description().to_string(),
            body: cc
                .body()
                .map(|b| b.to_string())
                .or_else(|| commit.body.clone()),
            breaking: cc.breaking()
                || commit.subject.contains("!:")
                || has_breaking_note(commit.body.as_deref()),
            ..commit.clone()
        },
        Err(_) => commit.clone(),
    }
}

fn has_breaking_note(body: Option<&str>) -> bool {
    body.is_some_and(|b| BREAKING_NOTE_REGEX.is_match(b))
}

/// Parse every commit independently, keeping input order.
pub fn parse_commits(commits: &[CommitRecord]) -> Vec<CommitRecord> {
    commits.iter().map(parse_commit).collect()
}

/// Check whether the first line of a message follows the Conventional
/// Commits header grammar. Used for reporting only.
pub fn is_conventional_commit(message: &str) -> bool {
    CONVENTIONAL_HEADER_REGEX.is_match(message)
}

/// Number of commits whose subject does not follow the header grammar.
pub fn count_non_conventional(commits: &[CommitRecord]) -> usize {
    commits
        .iter()
        .filter(|c| !is_conventional_commit(&c.subject))
        .count()
}
