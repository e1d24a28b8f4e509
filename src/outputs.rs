//! Reporting run outputs to the CI runner.
use log::*;
use std::{env, path::Path};
use tokio::io::AsyncWriteExt;

use crate::Result;

/// Environment variable naming the runner's output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

const DELIMITER: &str = "RELNOTES_EOF";

/// The three values every run reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutputs {
    pub release_notes: String,
    pub version: String,
    /// Empty when no release was created.
    pub release_url: String,
}

impl RunOutputs {
    /// Format in the runner's `name<<DELIMITER` block syntax.
    pub fn to_output_file_format(&self) -> String {
        [
            ("release-notes", &self.release_notes),
            ("version", &self.version),
            ("release-url", &self.release_url),
        ]
        .iter()
        .map(|(name, value)| format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n"))
        .collect()
    }

    /// Log the outputs and append them to `$GITHUB_OUTPUT` when it is set.
    pub async fn report(&self) -> Result<()> {
        info!("version: {}", self.version);
        if !self.release_url.is_empty() {
            info!("release url: {}", self.release_url);
        }

        match env::var(GITHUB_OUTPUT_ENV) {
            Ok(path) if !path.is_empty() => self.append_to(Path::new(&path)).await,
            _ => {
                debug!("{GITHUB_OUTPUT_ENV} not set, skipping output file");
                Ok(())
            }
        }
    }

    pub async fn append_to(&self, path: &Path) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(self.to_output_file_format().as_bytes())
            .await?;
        file.flush().await?;

        debug!("wrote outputs to {}", path.display());
        Ok(())
    }
}
