//! End-to-end release notes pipeline.
use chrono::{DateTime, NaiveDate, Utc};
use log::*;

use crate::{
    Result,
    analyzer::{
        ReleaseData, TagInfo,
        category::{
            categorize_commits, categorize_pull_requests, log_category_stats,
            merge_categories,
        },
        commit::{count_non_conventional, parse_commits},
        contributors::{
            contributor_stats, extract_contributors_from_commits,
            extract_contributors_from_prs, merge_contributors,
        },
        filter::{apply_commit_filters, apply_pr_filters},
    },
    changelog::{write_changelog, write_version_file},
    config::Settings,
    forge::{manager::ForgeManager, util::compare_url},
    logging::{self, Timer},
    outputs::RunOutputs,
    template::CustomTemplate,
    version::format_date,
};


/// Runs the pipeline for one tag.
pub struct Orchestrator {
    settings: Settings,
    forge: ForgeManager,
    today: NaiveDate,
}

impl Orchestrator {
    pub fn new(settings: Settings, forge: ForgeManager) -> Self {
        Self {
            settings,
            forge,
            today: Utc::now().date_naive(),
        }
    }

    /// Override the release date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    /// Generate notes, update the changelog, write the optional version
    /// file and publish the optional release.
    pub async fn generate(&self) -> Result<RunOutputs> {
        let notes = self.release_notes().await?;

        logging::section("Writing Output");

        write_changelog(
            &self.settings.changelog_file,
            &notes,
            &self.settings.version,
            self.settings.dry_run,
        )
        .await?;

        if self.settings.version_file {
            write_version_file(
                &self.settings.version_file_dir,
                &self.settings.version,
                &notes,
                self.settings.dry_run,
            )
            .await?;
        }

        let release_url = if self.settings.create_release {
            logging::section("Publishing Release");
            self.forge
                .create_release_if_absent(&self.settings.version, &notes)
                .await?
        } else {
            String::new()
        };

        logging::success("Release notes generated successfully!");

        Ok(RunOutputs {
            release_notes: notes,
            version: self.settings.version.clone(),
            release_url,
        })
    }

    /// Re-render notes and replace the body of the existing release.
    pub async fn update_release(&self) -> Result<RunOutputs> {
        let notes = self.release_notes().await?;

        logging::section("Updating Release");

        let release_url = self
            .forge
            .update_release_notes(&self.settings.version, &notes)
            .await?;

        logging::success("Release notes updated successfully!");

        Ok(RunOutputs {
            release_notes: notes,
            version: self.settings.version.clone(),
            release_url,
        })
    }

    /// Collect, analyze and render the notes for the configured version.
    pub async fn release_notes(&self) -> Result<String> {
        let data = self.release_data().await?;

        let timer = Timer::start("render");
        let notes = match &self.settings.template_file {
            Some(path) => {
                info!("rendering custom template: {}", path.display());
                CustomTemplate::load(path).await?.render(&data)?
            }
            None => {
                info!("rendering {} template", self.settings.template);
                self.settings.template.render(&data)
            }
        };
        timer.end();

        Ok(notes)
    }

    /// Build the render-ready data for the configured version.
    pub async fn release_data(&self) -> Result<ReleaseData> {
        let remote = self.forge.remote_config();
        let version = &self.settings.version;

        logging::section("Collecting Information");
        let timer = Timer::start("collect");

        let tags = self.forge.list_tags().await?;
        let previous = TagInfo::previous(&tags, version).cloned();

        match &previous {
            Some(tag) => info!("previous tag: {}", tag.name),
            None => info!("no previous tag found: treating {version} as first release"),
        }

        let commits = self
            .forge
            .get_commits(version, previous.as_ref().map(|t| t.sha.clone()))
            .await?;

        logging::section("Analyzing Changes");

        let commits = apply_commit_filters(commits, self.settings.filters);

        let non_conventional = count_non_conventional(&commits);
        if non_conventional > 0 {
            info!("{non_conventional} commits do not follow conventional commits");
        }

        let commits = parse_commits(&commits);
        let mut changes = categorize_commits(&commits);
        let mut contributor_lists = vec![extract_contributors_from_commits(&commits)];

        if self.settings.include_pull_requests {
            let since = self.pull_requests_since(previous.as_ref()).await?;
            let prs = self.forge.get_merged_pull_requests(since).await?;
            let prs = apply_pr_filters(prs, &self.settings.exclude_labels);

            changes = merge_categories(changes, categorize_pull_requests(&prs));
            contributor_lists.push(extract_contributors_from_prs(&prs));

            for (author, stats) in contributor_stats(&commits, &prs) {
                debug!(
                    "  {author}: {} commits, {} pull requests",
                    stats.commits, stats.pull_requests
                );
            }
        }

        log_category_stats(&changes);
        info!("total changes: {}", changes.total());
        timer.end_with_log();

        Ok(ReleaseData {
            version: version.clone(),
            date: format_date(self.today),
            changes,
            contributors: merge_contributors(&contributor_lists),
            compare_url: previous.map(|p| {
                compare_url(&remote.owner, &remote.repo, &p.name, version)
            }),
            owner: remote.owner,
            repo: remote.repo,
        })
    }

    /// Merge date cutoff for pull requests: the previous tag's commit date,
    /// or the beginning of time for a first release.
    async fn pull_requests_since(
        &self,
        previous: Option<&TagInfo>,
    ) -> Result<DateTime<Utc>> {
        let Some(previous) = previous else {
            return Ok(DateTime::UNIX_EPOCH);
        };

        if let Some(date) = previous.date {
            return Ok(date);
        }

        let tag = self.forge.get_tag(&previous.name).await?;

        Ok(tag.and_then(|t| t.date).unwrap_or(DateTime::UNIX_EPOCH))
    }
}
