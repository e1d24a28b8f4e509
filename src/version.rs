//! Version and tag helpers.
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?\d+\.\d+\.\d+(-[A-Za-z0-9.-]+)?$").unwrap()
});

/// Check whether a tag follows Semantic Versioning, with an optional
/// leading `v` and prerelease suffix (`v1.2.3`, `1.2.3-rc.1`).
pub fn is_valid_semver(version: &str) -> bool {
    SEMVER_REGEX.is_match(version)
}

/// Resolve the version from a tag reference by dropping any `refs/tags/`
/// prefix (`refs/tags/v1.0.0` -> `v1.0.0`).
pub fn extract_version(tag: &str) -> String {
    tag.strip_prefix("refs/tags/").unwrap_or(tag).to_string()
}

/// Format a release date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whether the version carries a semver prerelease component.
pub fn is_prerelease_version(version: &str) -> bool {
    let stripped = version.strip_prefix('v').unwrap_or(version);

    match semver::Version::parse(stripped) {
        Ok(parsed) => !parsed.pre.is_empty(),
        Err(_) => ["-alpha", "-beta", "-rc", "-pre"]
            .iter()
            .any(|marker| version.contains(marker)),
    }
}

/// File name used for the per-version changelog (`v1.2.3` -> `1.2.3.md`).
pub fn version_file_name(version: &str) -> String {
    format!("{}.md", version.strip_prefix('v').unwrap_or(version))
}
