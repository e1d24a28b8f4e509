//! Implements the Forge trait for Github
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    analyzer::{
        CommitRecord, PullRequestRecord, TagInfo, commit::UNKNOWN_AUTHOR,
        pull_request::extract_closed_issues,
    },
    error::ForgeError,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{CreateReleaseRequest, ForgeRelease, UpdateReleaseRequest},
        traits::Forge,
    },
};

#[derive(Debug, Serialize)]
struct PageQuery {
    per_page: u8,
    page: u32,
}

#[derive(Debug, Serialize)]
struct CommitsQuery<'a> {
    sha: &'a str,
    per_page: u8,
    page: u32,
}

#[derive(Debug, Serialize)]
struct PullsQuery {
    state: &'static str,
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct TagCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
    commit: TagCommit,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    message: String,
    author: Option<GitSignature>,
    committer: Option<GitSignature>,
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Commit {
    sha: String,
    commit: GitCommit,
    author: Option<User>,
}

#[derive(Debug, Deserialize)]
struct Label {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Pull {
    number: u64,
    title: String,
    body: Option<String>,
    user: Option<User>,
    #[serde(default)]
    labels: Vec<Label>,
    merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct Release {
    id: u64,
    tag_name: String,
    html_url: String,
}

impl From<Release> for ForgeRelease {
    fn from(release: Release) -> Self {
        Self {
            id: release.id,
            tag_name: release.tag_name,
            html_url: release.html_url,
        }
    }
}

impl From<Commit> for CommitRecord {
    fn from(commit: Commit) -> Self {
        let hash: String = commit.sha.chars().take(7).collect();

        let author_name = commit
            .commit
            .author
            .as_ref()
            .and_then(|a| a.name.clone());

        let author = commit.author.map(|u| u.login).or(author_name);

        let date = commit
            .commit
            .author
            .as_ref()
            .and_then(|a| a.date)
            .unwrap_or_else(Utc::now);

        CommitRecord::from_message(
            &hash,
            &commit.commit.message,
            author.as_deref(),
            date,
        )
    }
}

impl Pull {
    fn into_record(self, merged_at: DateTime<Utc>) -> PullRequestRecord {
        let closed_issues =
            extract_closed_issues(self.body.as_deref().unwrap_or_default());

        PullRequestRecord {
            number: self.number,
            title: self.title,
            body: self.body,
            author: self
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.into()),
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            merged_at,
            closed_issues,
        }
    }
}

/// GitHub forge implementation using Octocrab's REST client.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_base_uri())?
            .build()?;

        Ok(Self { config, instance })
    }

    fn route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{suffix}", self.config.owner, self.config.repo)
    }

    /// Map "not found" to `None`, everything else to a typed error.
    fn optional<T>(result: octocrab::Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => match ForgeError::from(err) {
                ForgeError::NotFound(_) => Ok(None),
                err => Err(err.into()),
            },
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_tags(&self) -> Result<Vec<TagInfo>> {
        debug!("fetching tags for {}", self.config.path());

        let route = self.route("tags");
        let mut tags = vec![];
        let mut page = 1;

        loop {
            let query = PageQuery {
                per_page: DEFAULT_PAGE_SIZE,
                page,
            };

            let data: Vec<Tag> = self
                .instance
                .get(&route, Some(&query))
                .await
                .map_err(ForgeError::from)?;

            let count = data.len();

            tags.extend(data.into_iter().map(|t| TagInfo {
                name: t.name,
                sha: t.commit.sha,
                date: None,
            }));

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        debug!("found {} tags", tags.len());
        Ok(tags)
    }

    async fn get_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        debug!("fetching tag: {name}");

        let route = self.route(&format!("commits/{name}"));
        let result = self.instance.get::<Commit, _, ()>(&route, None).await;

        let Some(commit) = Self::optional(result)? else {
            debug!("tag not found: {name}");
            return Ok(None);
        };

        let date = commit
            .commit
            .committer
            .and_then(|c| c.date)
            .or_else(|| commit.commit.author.and_then(|a| a.date));

        Ok(Some(TagInfo {
            name: name.to_string(),
            sha: commit.sha,
            date,
        }))
    }

    async fn get_commits(
        &self,
        tag: &str,
        until_sha: Option<String>,
    ) -> Result<Vec<CommitRecord>> {
        debug!(
            "fetching commits from {tag} back to {}",
            until_sha.as_deref().unwrap_or("start")
        );

        let route = self.route("commits");
        let mut commits = vec![];
        let mut page = 1;

        'pages: loop {
            let query = CommitsQuery {
                sha: tag,
                per_page: DEFAULT_PAGE_SIZE,
                page,
            };

            let data: Vec<Commit> = self
                .instance
                .get(&route, Some(&query))
                .await
                .map_err(ForgeError::from)?;

            let count = data.len();

            for commit in data {
                if until_sha.as_deref() == Some(commit.sha.as_str()) {
                    break 'pages;
                }
                commits.push(CommitRecord::from(commit));
            }

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        info!("found {} commits", commits.len());
        Ok(commits)
    }

    async fn get_merged_pull_requests(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PullRequestRecord>> {
        debug!("fetching pull requests merged since {since}");

        let route = self.route("pulls");
        let mut prs = vec![];
        let mut page = 1;

        'pages: loop {
            let query = PullsQuery {
                state: "closed",
                sort: "updated",
                direction: "desc",
                per_page: DEFAULT_PAGE_SIZE,
                page,
            };

            let data: Vec<Pull> = self
                .instance
                .get(&route, Some(&query))
                .await
                .map_err(ForgeError::from)?;

            let count = data.len();

            for pr in data {
                let Some(merged_at) = pr.merged_at else {
                    continue;
                };

                if merged_at < since {
                    break 'pages;
                }

                prs.push(pr.into_record(merged_at));
            }

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        info!("found {} merged PRs", prs.len());
        Ok(prs)
    }

    async fn get_release_by_tag(
        &self,
        tag: &str,
    ) -> Result<Option<ForgeRelease>> {
        let route = self.route(&format!("releases/tags/{tag}"));
        let result = self.instance.get::<Release, _, ()>(&route, None).await;
        Ok(Self::optional(result)?.map(ForgeRelease::from))
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ForgeRelease> {
        let route = self.route("releases");

        let release: Release = self
            .instance
            .post(route, Some(&req))
            .await
            .map_err(ForgeError::from)?;

        Ok(release.into())
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ForgeRelease> {
        let route = self.route(&format!("releases/{}", req.release_id));

        let release: Release = self
            .instance
            .patch(route, Some(&req))
            .await
            .map_err(ForgeError::from)?;

        Ok(release.into())
    }
}
