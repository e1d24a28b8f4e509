//! Commit and pull request analysis.
//!
//! Raw forge records flow through [`filter`], [`commit::parse_commits`] and
//! [`category`] to become [`types::ChangeItem`]s grouped by category, while
//! [`contributors`] collects the handles to credit.

pub mod category;
pub mod commit;
pub mod contributors;
pub mod filter;
pub mod pull_request;
pub mod types;

pub use category::{CategorizedChanges, Category};
pub use commit::CommitRecord;
pub use pull_request::PullRequestRecord;
pub use types::{ChangeItem, ChangeSource, ReleaseData, TagInfo};
