//! Input validation, run once before any network call.
//!
//! Every check contributes errors (fatal) and warnings (logged only).
//! [`validate_inputs`] aggregates them into a single
//! [`RelnotesError::Validation`].
use log::*;
use secrecy::ExposeSecret;
use std::path::Path;

use crate::{
    Result,
    config::Inputs,
    error::RelnotesError,
    logging,
    template::TemplateKind,
    version::is_valid_semver,
};

/// Minimum plausible access token length.
const MIN_TOKEN_LENGTH: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn error(message: String) -> Self {
        Self {
            errors: vec![message],
            warnings: vec![],
        }
    }

    fn warning(message: String) -> Self {
        Self {
            errors: vec![],
            warnings: vec![message],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

pub fn validate_tag_format(tag: &str) -> ValidationResult {
    if !is_valid_semver(tag) {
        return ValidationResult::error(format!(
            "Invalid tag format: '{tag}'. Expected Semantic Versioning (e.g., v1.2.3, v2.0.0-beta.1)"
        ));
    }

    logging::validation(true, &format!("Valid Semantic Versioning tag: {tag}"));
    ValidationResult::default()
}

pub fn validate_template(name: &str) -> ValidationResult {
    if name.parse::<TemplateKind>().is_err() {
        return ValidationResult::error(format!(
            "Invalid template: '{name}'. Available templates: {}",
            TemplateKind::available()
        ));
    }

    logging::validation(true, &format!("Template '{name}' is valid"));
    ValidationResult::default()
}

/// A missing parent directory is only a warning, it is created on write.
pub async fn validate_file_path(path: &Path) -> ValidationResult {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return ValidationResult::default();
    };

    match tokio::fs::try_exists(dir).await {
        Ok(true) => {
            logging::validation(
                true,
                &format!("Directory '{}' exists", dir.display()),
            );
            ValidationResult::default()
        }
        Ok(false) => ValidationResult::warning(format!(
            "Directory '{}' does not exist, will be created",
            dir.display()
        )),
        Err(_) => ValidationResult::warning(format!(
            "Could not validate file path: {}",
            path.display()
        )),
    }
}

/// Presence and length check only, the token is not verified remotely.
pub fn validate_github_token(token: &str) -> ValidationResult {
    if token.trim().is_empty() {
        return ValidationResult::error("GitHub token is required".into());
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return ValidationResult::error(
            "GitHub token appears to be invalid (too short)".into(),
        );
    }

    logging::validation(true, "GitHub token is provided");
    ValidationResult::default()
}

pub fn validate_boolean(value: &str, name: &str) -> ValidationResult {
    match value {
        "true" | "false" | "" => ValidationResult::default(),
        _ => ValidationResult::error(format!(
            "Invalid boolean value for '{name}': '{value}'. Expected 'true' or 'false'"
        )),
    }
}

pub fn validate_exclude_labels(labels: &str) -> ValidationResult {
    let labels = split_labels(labels);

    if !labels.is_empty() {
        logging::validation(
            true,
            &format!("Exclude labels: {}", labels.join(", ")),
        );
    }

    ValidationResult::default()
}

/// Split a comma separated label list, dropping blanks.
pub fn split_labels(labels: &str) -> Vec<String> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run every check and fail with one aggregated error when any fails.
/// Returns the collected warnings otherwise.
pub async fn validate_inputs(inputs: &Inputs) -> Result<ValidationResult> {
    logging::section("Input Validation");

    let result = ValidationResult::default()
        .merge(validate_tag_format(&inputs.version))
        .merge(validate_template(&inputs.template))
        .merge(validate_file_path(Path::new(&inputs.changelog_file)).await)
        .merge(validate_github_token(inputs.token.expose_secret()))
        .merge(validate_boolean(&inputs.version_file, "version-file"))
        .merge(validate_boolean(&inputs.create_release, "create-release"))
        .merge(validate_boolean(&inputs.dry_run, "dry-run"))
        .merge(validate_boolean(
            &inputs.include_pull_requests,
            "include-pull-requests",
        ))
        .merge(validate_exclude_labels(&inputs.exclude_labels));

    for error in &result.errors {
        error!("{error}");
    }

    for warning in &result.warnings {
        warn!("{warning}");
    }

    if !result.is_valid() {
        return Err(RelnotesError::Validation(result.errors).into());
    }

    logging::success("All input validations passed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TEST_TOKEN;
    use secrecy::SecretString;

    fn valid_inputs() -> Inputs {
        Inputs {
            version: "v1.2.3".into(),
            template: "standard".into(),
            template_file: None,
            changelog_file: "CHANGELOG.md".into(),
            token: SecretString::from(TEST_TOKEN.to_string()),
            version_file: "false".into(),
            create_release: "".into(),
            dry_run: "true".into(),
            include_pull_requests: "".into(),
            exclude_labels: "skip-changelog, no-changelog".into(),
        }
    }

    #[test]
    fn tag_validation() {
        assert!(!validate_tag_format("1.2").is_valid());
        assert!(validate_tag_format("v1.2.3-rc.1").is_valid());
        assert_eq!(
            validate_tag_format("main").errors,
            vec![
                "Invalid tag format: 'main'. Expected Semantic Versioning (e.g., v1.2.3, v2.0.0-beta.1)"
            ]
        );
    }

    #[test]
    fn template_validation_ignores_case() {
        assert!(validate_template("Detailed").is_valid());
        assert_eq!(
            validate_template("fancy").errors,
            vec![
                "Invalid template: 'fancy'. Available templates: standard, detailed, minimal"
            ]
        );
    }

    #[test]
    fn token_validation() {
        assert_eq!(
            validate_github_token("  ").errors,
            vec!["GitHub token is required"]
        );
        assert_eq!(
            validate_github_token("short").errors,
            vec!["GitHub token appears to be invalid (too short)"]
        );
        assert!(validate_github_token(TEST_TOKEN).is_valid());
    }

    #[test]
    fn boolean_validation_is_exact() {
        assert!(validate_boolean("true", "dry-run").is_valid());
        assert!(validate_boolean("false", "dry-run").is_valid());
        assert!(validate_boolean("", "dry-run").is_valid());
        assert!(!validate_boolean("TRUE", "dry-run").is_valid());
        assert!(!validate_boolean("yes", "dry-run").is_valid());
    }

    #[test]
    fn splits_labels() {
        assert_eq!(
            split_labels(" skip-changelog, ,no-changelog "),
            vec!["skip-changelog", "no-changelog"]
        );
        assert!(split_labels("").is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_only_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("CHANGELOG.md");

        let result = validate_file_path(&path).await;

        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert!(validate_file_path(Path::new("CHANGELOG.md")).await.warnings.is_empty());
    }

    #[tokio::test]
    async fn valid_inputs_pass() {
        let result = validate_inputs(&valid_inputs()).await.unwrap();
        assert!(result.is_valid());
    }

    #[test_log::test(tokio::test)]
    async fn aggregates_every_failure() {
        let inputs = Inputs {
            version: "1.2".into(),
            template: "fancy".into(),
            token: SecretString::from("short".to_string()),
            dry_run: "yes".into(),
            ..valid_inputs()
        };

        let err = validate_inputs(&inputs).await.unwrap_err();

        match err.downcast_ref::<RelnotesError>() {
            Some(RelnotesError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
