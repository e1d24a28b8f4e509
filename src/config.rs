//! Configuration loading for `relnotes.toml` and resolution of run inputs.
//!
//! Values flow in three steps: the optional config file gives defaults,
//! CLI flags and environment variables override them as raw [`Inputs`],
//! and after validation the inputs become typed [`Settings`].
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    Result,
    analyzer::filter::CommitFilterOptions,
    changelog::VERSION_FILE_DIR,
    cli::Args,
    forge::retry::RetryPolicy,
    template::TemplateKind,
    validator::split_labels,
    version::extract_version,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "relnotes.toml";

/// Default changelog destination.
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// PR labels excluded from the notes unless configured otherwise.
pub const DEFAULT_EXCLUDE_LABELS: &[&str] = &["skip-changelog", "no-changelog"];

/// Root configuration structure for `relnotes.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in template name: standard, detailed or minimal.
    pub template: String,
    /// Path to a Tera template replacing the built-in layout.
    pub template_file: Option<PathBuf>,
    pub changelog_file: String,
    /// Also write `changelog/<version>.md` (default: false)
    pub version_file: bool,
    /// Publish the notes as a GitHub release (default: false)
    pub create_release: bool,
    /// PR labels that keep a pull request out of the notes.
    pub exclude_labels: Vec<String>,
    /// Add merged pull requests to the commit based notes (default: false)
    pub include_pull_requests: bool,
    pub filters: CommitFilterOptions,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: TemplateKind::default().name().to_string(),
            template_file: None,
            changelog_file: DEFAULT_CHANGELOG_FILE.to_string(),
            version_file: false,
            create_release: false,
            exclude_labels: DEFAULT_EXCLUDE_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            include_pull_requests: false,
            filters: CommitFilterOptions::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is absent.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            info!("no configuration found: using default");
            return Ok(Self::default());
        }

        info!("loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&content)?)
    }
}

/// Raw run inputs before validation. Flags are kept as strings so that
/// exactly `"true"`, `"false"` or `""` can be enforced.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub version: String,
    pub template: String,
    pub template_file: Option<PathBuf>,
    pub changelog_file: String,
    pub token: SecretString,
    pub version_file: String,
    pub create_release: String,
    pub dry_run: String,
    pub include_pull_requests: String,
    pub exclude_labels: String,
}

impl Inputs {
    /// Merge CLI values over config file values.
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let flag = |cli: &Option<String>, file: bool| {
            cli.clone().unwrap_or_else(|| file.to_string())
        };

        Self {
            version: extract_version(&args.tag),
            template: args
                .template
                .clone()
                .unwrap_or_else(|| config.template.clone()),
            template_file: args
                .template_file
                .clone()
                .or_else(|| config.template_file.clone()),
            changelog_file: args
                .changelog_file
                .clone()
                .unwrap_or_else(|| config.changelog_file.clone()),
            token: SecretString::from(args.github_token.clone()),
            version_file: flag(&args.version_file, config.version_file),
            create_release: flag(&args.create_release, config.create_release),
            dry_run: args.dry_run.clone(),
            include_pull_requests: flag(
                &args.include_pull_requests,
                config.include_pull_requests,
            ),
            exclude_labels: args
                .exclude_labels
                .clone()
                .unwrap_or_else(|| config.exclude_labels.join(",")),
        }
    }
}

/// Typed settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub version: String,
    pub template: TemplateKind,
    pub template_file: Option<PathBuf>,
    pub changelog_file: PathBuf,
    pub version_file: bool,
    /// Directory receiving `<version>.md` files.
    pub version_file_dir: PathBuf,
    pub create_release: bool,
    pub dry_run: bool,
    pub include_pull_requests: bool,
    pub exclude_labels: Vec<String>,
    pub filters: CommitFilterOptions,
    pub retry: RetryPolicy,
}

impl Settings {
    /// Convert validated inputs. Only `"true"` enables a flag.
    pub fn from_inputs(inputs: &Inputs, config: &Config) -> Result<Self> {
        Ok(Self {
            version: inputs.version.clone(),
            template: inputs.template.parse()?,
            template_file: inputs.template_file.clone(),
            changelog_file: PathBuf::from(&inputs.changelog_file),
            version_file: inputs.version_file == "true",
            version_file_dir: PathBuf::from(VERSION_FILE_DIR),
            create_release: inputs.create_release == "true",
            dry_run: inputs.dry_run == "true",
            include_pull_requests: inputs.include_pull_requests == "true",
            exclude_labels: split_labels(&inputs.exclude_labels),
            filters: config.filters,
            retry: config.retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn loads_defaults() {
        let config = Config::default();
        assert_eq!(config.template, "standard");
        assert_eq!(config.changelog_file, "CHANGELOG.md");
        assert_eq!(config.exclude_labels, vec!["skip-changelog", "no-changelog"]);
        assert!(config.filters.exclude_chore);
        assert!(!config.filters.exclude_merge);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn parses_partial_toml() {
        let toml = r#"
template = "detailed"
include_pull_requests = true

[filters]
exclude_merge = true

[retry]
max_attempts = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.template, "detailed");
        assert!(config.include_pull_requests);
        assert!(config.filters.exclude_chore);
        assert!(config.filters.exclude_merge);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert_eq!(config.changelog_file, "CHANGELOG.md");
    }

    #[tokio::test]
    async fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load(&dir.path().join(DEFAULT_CONFIG_FILE))
            .await
            .unwrap();

        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&path, "template_file = \"notes.tera\"\n")
            .await
            .unwrap();

        let config = Config::load(&path).await.unwrap();

        assert_eq!(config.template_file, Some(PathBuf::from("notes.tera")));
    }

    #[test]
    fn cli_values_override_config() {
        let args = Args::parse_from([
            "relnotes",
            "--tag",
            "refs/tags/v1.2.3",
            "--template",
            "minimal",
            "--create-release",
            "true",
            "--exclude-labels",
            "internal",
            "generate",
        ]);
        let config = Config {
            template: "detailed".into(),
            version_file: true,
            ..Default::default()
        };

        let inputs = Inputs::resolve(&args, &config);

        assert_eq!(inputs.version, "v1.2.3");
        assert_eq!(inputs.template, "minimal");
        assert_eq!(inputs.version_file, "true");
        assert_eq!(inputs.create_release, "true");
        assert_eq!(inputs.exclude_labels, "internal");

        let settings = Settings::from_inputs(&inputs, &config).unwrap();
        assert_eq!(settings.template, TemplateKind::Minimal);
        assert!(settings.version_file);
        assert!(settings.create_release);
        assert_eq!(settings.exclude_labels, vec!["internal"]);
    }
}
