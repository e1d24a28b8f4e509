//! CLI argument parsing and remote configuration.
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;

use crate::{
    Result,
    config::DEFAULT_CONFIG_FILE,
    error::RelnotesError,
    forge::{config::RemoteConfig, util::parse_repo},
};

/// Generate release notes from conventional commits and publish them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "", global = true)]
    /// Repository as owner/repo or a full URL.
    pub github_repo: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    /// GitHub access token.
    pub github_token: String,

    #[arg(long, env = "GITHUB_REF", default_value = "", global = true)]
    /// Tag to release, optionally as refs/tags/<tag>.
    pub tag: String,

    #[arg(long, global = true)]
    /// Template: standard, detailed or minimal.
    pub template: Option<String>,

    #[arg(long, global = true)]
    /// Tera template file replacing the built-in layout.
    pub template_file: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Changelog file to update.
    pub changelog_file: Option<String>,

    #[arg(long, global = true)]
    /// Also write changelog/<version>.md ("true" or "false").
    pub version_file: Option<String>,

    #[arg(long, global = true)]
    /// Publish a GitHub release ("true" or "false").
    pub create_release: Option<String>,

    #[arg(long, global = true)]
    /// Include merged pull requests ("true" or "false").
    pub include_pull_requests: Option<String>,

    #[arg(long, default_value = "", global = true)]
    /// Log writes instead of performing them ("true" or "false").
    pub dry_run: String,

    #[arg(long, global = true)]
    /// Comma separated PR labels to leave out.
    pub exclude_labels: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Path to the configuration file.
    pub config: PathBuf,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute (default: generate).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Release notes subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Generate notes, update the changelog and optionally publish a release.
    Generate,

    /// Re-render notes and replace the body of an existing release.
    UpdateRelease,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Generate)
    }

    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self, dry_run: bool) -> Result<RemoteConfig> {
        if self.github_repo.is_empty() {
            return Err(RelnotesError::InvalidArgs(
                "must configure a remote: --github-repo or GITHUB_REPOSITORY"
                    .into(),
            )
            .into());
        }

        let slug = parse_repo(&self.github_repo)?;

        Ok(RemoteConfig {
            host: slug.host,
            owner: slug.owner,
            repo: slug.repo,
            token: SecretString::from(self.github_token.clone()),
            dry_run,
        })
    }
}
