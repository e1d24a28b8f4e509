//! Writing rendered notes to the changelog and per-version files.
use log::*;
use std::path::{Path, PathBuf};

use crate::{Result, logging, version::version_file_name};

/// Directory holding per-version files.
pub const VERSION_FILE_DIR: &str = "changelog";

/// Title block written at the top of a new changelog.
pub const CHANGELOG_TITLE: &str = "# Changelog\n\nAll notable changes to this project will be documented in this file.\n\n";

/// Insert a rendered section into existing changelog text.
///
/// The section goes right after the first `# ` heading line. Text without
/// such a heading (including an empty file) gets the standard title block
/// first.
pub fn insert_section(existing: &str, section: &str) -> String {
    if existing.is_empty() {
        return format!("{CHANGELOG_TITLE}{section}");
    }

    let inserted = format!("\n{section}");
    let mut lines: Vec<&str> = existing.split('\n').collect();

    match lines.iter().position(|line| line.starts_with("# ")) {
        Some(index) => {
            lines.insert(index + 1, &inserted);
            lines.join("\n")
        }
        None => format!("{CHANGELOG_TITLE}{section}\n{existing}"),
    }
}

/// Whether the changelog already documents `version`.
pub fn has_version_section(existing: &str, version: &str) -> bool {
    let bracketed = format!("## [{version}]");
    let plain = format!("## {version} ");

    existing
        .lines()
        .any(|line| line.starts_with(&bracketed) || line.starts_with(&plain))
}

/// Insert `section` into the changelog at `path`, creating the file and
/// its parent directory when missing. Dry runs only log the section.
pub async fn write_changelog(
    path: &Path,
    section: &str,
    version: &str,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        warn!("dry_run: would write to: {}", path.display());
        info!("\n{section}");
        return Ok(());
    }

    let existing = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("changelog not found, creating new one: {}", path.display());
            String::new()
        }
        Err(err) => return Err(err.into()),
    };

    if has_version_section(&existing, version) {
        warn!(
            "{} already contains a section for {version}, adding another",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, insert_section(&existing, section)).await?;
    logging::success(&format!("written to {}", path.display()));

    Ok(())
}

/// Write `content` to `<dir>/<version without v>.md`.
pub async fn write_version_file(
    dir: &Path,
    version: &str,
    content: &str,
    dry_run: bool,
) -> Result<PathBuf> {
    let path = dir.join(version_file_name(version));

    if dry_run {
        warn!("dry_run: would write to: {}", path.display());
        return Ok(path);
    }

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, content).await?;
    logging::success(&format!("written to {}", path.display()));

    Ok(path)
}
