//! Traits related to remote git forges
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    analyzer::{CommitRecord, PullRequestRecord, TagInfo},
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, ForgeRelease, UpdateReleaseRequest},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    /// Repository tags, most recent first.
    async fn list_tags(&self) -> Result<Vec<TagInfo>>;

    /// A single tag with its commit date, `None` if it does not exist.
    async fn get_tag(&self, name: &str) -> Result<Option<TagInfo>>;

    /// Commits reachable from `tag`, newest first, stopping before
    /// `until_sha` when given.
    async fn get_commits(
        &self,
        tag: &str,
        until_sha: Option<String>,
    ) -> Result<Vec<CommitRecord>>;

    /// Pull requests merged at or after `since`, most recently updated
    /// first.
    async fn get_merged_pull_requests(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PullRequestRecord>>;

    async fn get_release_by_tag(&self, tag: &str)
    -> Result<Option<ForgeRelease>>;

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ForgeRelease>;

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ForgeRelease>;
}
