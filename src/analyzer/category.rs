use log::*;
use serde::Serialize;

use crate::analyzer::{
    commit::CommitRecord,
    pull_request::{PullRequestRecord, extract_type_from_pr_title},
    types::{ChangeItem, ChangeSource},
};

/// PR label that marks a change as breaking.
pub const BREAKING_CHANGE_LABEL: &str = "breaking-change";

/// Release-notes categories. Declaration order is the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Breaking,
    Features,
    BugFixes,
    Documentation,
    Performance,
    Refactoring,
    Style,
    Tests,
    Build,
    Ci,
    Other,
}

impl Category {
    /// Every category in presentation order.
    pub const ALL: [Category; 11] = [
        Category::Breaking,
        Category::Features,
        Category::BugFixes,
        Category::Documentation,
        Category::Performance,
        Category::Refactoring,
        Category::Style,
        Category::Tests,
        Category::Build,
        Category::Ci,
        Category::Other,
    ];

    /// Stable key used in serialized release data.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Breaking => "breaking",
            Category::Features => "features",
            Category::BugFixes => "bugFixes",
            Category::Documentation => "documentation",
            Category::Performance => "performance",
            Category::Refactoring => "refactoring",
            Category::Style => "style",
            Category::Tests => "tests",
            Category::Build => "build",
            Category::Ci => "ci",
            Category::Other => "other",
        }
    }

    /// Label used when logging category counts.
    pub fn stats_label(&self) -> &'static str {
        match self {
            Category::Breaking => "Breaking Changes",
            Category::Features => "Features",
            Category::BugFixes => "Bug Fixes",
            Category::Documentation => "Documentation",
            Category::Performance => "Performance",
            Category::Refactoring => "Refactoring",
            Category::Style => "Style",
            Category::Tests => "Tests",
            Category::Build => "Build",
            Category::Ci => "CI/CD",
            Category::Other => "Other",
        }
    }

    /// Map a conventional commit type to its category. Unknown and empty
    /// types fall into [`Category::Other`].
    pub fn from_commit_type(kind: &str) -> Category {
        match kind {
            "feat" => Category::Features,
            "fix" => Category::BugFixes,
            "docs" => Category::Documentation,
            "style" => Category::Style,
            "refactor" => Category::Refactoring,
            "perf" => Category::Performance,
            "test" => Category::Tests,
            "build" => Category::Build,
            "ci" => Category::Ci,
            _ => Category::Other,
        }
    }

    /// Map a PR label (any case) to a category.
    pub fn from_label(label: &str) -> Option<Category> {
        match label.to_lowercase().as_str() {
            "feature" | "enhancement" => Some(Category::Features),
            "bug" | "bugfix" => Some(Category::BugFixes),
            "documentation" => Some(Category::Documentation),
            "performance" => Some(Category::Performance),
            BREAKING_CHANGE_LABEL => Some(Category::Breaking),
            _ => None,
        }
    }
}

/// Changes grouped into the fixed set of categories. Items keep their
/// input order within each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedChanges {
    pub breaking: Vec<ChangeItem>,
    pub features: Vec<ChangeItem>,
    pub bug_fixes: Vec<ChangeItem>,
    pub documentation: Vec<ChangeItem>,
    pub performance: Vec<ChangeItem>,
    pub refactoring: Vec<ChangeItem>,
    pub style: Vec<ChangeItem>,
    pub tests: Vec<ChangeItem>,
    pub build: Vec<ChangeItem>,
    pub ci: Vec<ChangeItem>,
    pub other: Vec<ChangeItem>,
}

impl CategorizedChanges {
    pub fn get(&self, category: Category) -> &[ChangeItem] {
        match category {
            Category::Breaking => &self.breaking,
            Category::Features => &self.features,
            Category::BugFixes => &self.bug_fixes,
            Category::Documentation => &self.documentation,
            Category::Performance => &self.performance,
            Category::Refactoring => &self.refactoring,
            Category::Style => &self.style,
            Category::Tests => &self.tests,
            Category::Build => &self.build,
            Category::Ci => &self.ci,
            Category::Other => &self.other,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<ChangeItem> {
        match category {
            Category::Breaking => &mut self.breaking,
            Category::Features => &mut self.features,
            Category::BugFixes => &mut self.bug_fixes,
            Category::Documentation => &mut self.documentation,
            Category::Performance => &mut self.performance,
            Category::Refactoring => &mut self.refactoring,
            Category::Style => &mut self.style,
            Category::Tests => &mut self.tests,
            Category::Build => &mut self.build,
            Category::Ci => &mut self.ci,
            Category::Other => &mut self.other,
        }
    }

    pub fn push(&mut self, category: Category, item: ChangeItem) {
        self.get_mut(category).push(item);
    }

    /// Non-empty categories with their items, in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ChangeItem])> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, items)| !items.is_empty())
    }

    /// Every item, flattened in presentation order.
    pub fn all_items(&self) -> impl Iterator<Item = &ChangeItem> {
        Category::ALL.into_iter().flat_map(|c| self.get(c).iter())
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Bucket parsed commits. Breaking commits always go to
/// [`Category::Breaking`], everything else by type.
pub fn categorize_commits(commits: &[CommitRecord]) -> CategorizedChanges {
    let mut categories = CategorizedChanges::default();

    for commit in commits {
        let item = ChangeItem {
            kind: commit.kind.clone(),
            description: commit.subject.clone(),
            source: ChangeSource::Commit(commit.hash.clone()),
            author: commit.author.clone(),
            issues: vec![],
            breaking: commit.breaking,
        };

        let category = if commit.breaking {
            Category::Breaking
        } else {
            Category::from_commit_type(&commit.kind)
        };

        categories.push(category, item);
    }

    categories
}

/// Bucket pull requests. A `breaking-change` label wins, otherwise the
/// first label (in label order) with a known category decides.
pub fn categorize_pull_requests(
    prs: &[PullRequestRecord],
) -> CategorizedChanges {
    let mut categories = CategorizedChanges::default();

    for pr in prs {
        let breaking = pr.labels.iter().any(|l| l == BREAKING_CHANGE_LABEL);

        let item = ChangeItem {
            kind: extract_type_from_pr_title(&pr.title).unwrap_or_default(),
            description: pr.title.clone(),
            source: ChangeSource::PullRequest(pr.number),
            author: pr.author.clone(),
            issues: pr.closed_issues.clone(),
            breaking,
        };

        let category = if breaking {
            Category::Breaking
        } else {
            pr.labels
                .iter()
                .find_map(|l| Category::from_label(l))
                .unwrap_or(Category::Other)
        };

        categories.push(category, item);
    }

    categories
}

/// Concatenate two categorizations, `a`'s items first.
pub fn merge_categories(
    a: CategorizedChanges,
    b: CategorizedChanges,
) -> CategorizedChanges {
    let mut merged = a;

    for category in Category::ALL {
        merged
            .get_mut(category)
            .extend(b.get(category).iter().cloned());
    }

    merged
}

/// Item counts per category, in presentation order.
pub fn category_stats(
    categories: &CategorizedChanges,
) -> Vec<(&'static str, usize)> {
    Category::ALL
        .iter()
        .map(|c| (c.stats_label(), categories.get(*c).len()))
        .collect()
}

pub fn log_category_stats(categories: &CategorizedChanges) {
    info!("categorizing changes...");
    for (label, count) in category_stats(categories) {
        if count > 0 {
            info!("  {label}: {count} items");
        }
    }
}
