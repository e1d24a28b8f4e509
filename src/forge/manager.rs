//! Manager that wraps forge implementations
use chrono::{DateTime, Utc};
use log::*;

use crate::{
    Result,
    analyzer::{CommitRecord, PullRequestRecord, TagInfo},
    error::RelnotesError,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, ForgeRelease, UpdateReleaseRequest},
        retry::RetryPolicy,
        traits::Forge,
    },
    version::is_prerelease_version,
};

/// Routes every forge call through the retry policy and suppresses
/// writes in dry-run mode.
pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
    retry: RetryPolicy,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, retry: RetryPolicy) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
            retry,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn list_tags(&self) -> Result<Vec<TagInfo>> {
        self.retry
            .retry("list tags", || self.forge.list_tags())
            .await
    }

    pub async fn get_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        self.retry
            .retry("get tag", || self.forge.get_tag(name))
            .await
    }

    pub async fn get_commits(
        &self,
        tag: &str,
        until_sha: Option<String>,
    ) -> Result<Vec<CommitRecord>> {
        debug!(
            "getting commits for tag [{tag}] back to sha: {:?}",
            until_sha
        );
        self.retry
            .retry("get commits", || {
                self.forge.get_commits(tag, until_sha.clone())
            })
            .await
    }

    pub async fn get_merged_pull_requests(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PullRequestRecord>> {
        self.retry
            .retry("get pull requests", || {
                self.forge.get_merged_pull_requests(since)
            })
            .await
    }

    pub async fn get_release_by_tag(
        &self,
        tag: &str,
    ) -> Result<Option<ForgeRelease>> {
        self.retry
            .retry("get release", || self.forge.get_release_by_tag(tag))
            .await
    }

    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ForgeRelease> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(ForgeRelease {
                id: 0,
                tag_name: req.tag_name,
                html_url: String::new(),
            });
        }

        self.retry
            .retry("create release", || self.forge.create_release(req.clone()))
            .await
    }

    pub async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ForgeRelease> {
        if self.remote_config.dry_run {
            warn!("dry_run: would update release: req: {:#?}", req);
            return Ok(ForgeRelease {
                id: req.release_id,
                tag_name: String::new(),
                html_url: String::new(),
            });
        }

        self.retry
            .retry("update release", || self.forge.update_release(req.clone()))
            .await
    }

    /// Publish `notes` as the release for `tag` unless one already exists.
    /// Returns the release URL, empty in dry-run mode.
    pub async fn create_release_if_absent(
        &self,
        tag: &str,
        notes: &str,
    ) -> Result<String> {
        if let Some(existing) = self.get_release_by_tag(tag).await? {
            warn!("release {tag} already exists, skipping creation");
            if self.remote_config.dry_run {
                return Ok(String::new());
            }
            return Ok(existing.html_url);
        }

        info!("creating release: {tag}");

        let req = CreateReleaseRequest {
            tag_name: tag.to_string(),
            name: format!("Release {tag}"),
            body: notes.to_string(),
            draft: false,
            prerelease: is_prerelease_version(tag),
        };

        let release = self.create_release(req).await?;

        if !release.html_url.is_empty() {
            info!("release created: {}", release.html_url);
        }

        Ok(release.html_url)
    }

    /// Replace the notes of the existing release for `tag`.
    pub async fn update_release_notes(
        &self,
        tag: &str,
        notes: &str,
    ) -> Result<String> {
        let existing = self
            .get_release_by_tag(tag)
            .await?
            .ok_or_else(|| RelnotesError::ReleaseNotFound(tag.to_string()))?;

        info!("updating release: {tag}");

        let release = self
            .update_release(UpdateReleaseRequest {
                release_id: existing.id,
                body: notes.to_string(),
            })
            .await?;

        Ok(release.html_url)
    }
}
