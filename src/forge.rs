//! Access to the remote forge hosting the repository.
//!
//! [`traits::Forge`] is the seam the pipeline talks to, [`github::Github`]
//! implements it for GitHub and GitHub Enterprise, and
//! [`manager::ForgeManager`] adds retries and the dry-run gate.

/// Connection settings and authentication.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Retry and dry-run wrapper around a forge.
pub mod manager;

/// Request and response types.
pub mod request;

/// Exponential backoff policy.
pub mod retry;

/// Common trait for forge platform abstraction.
pub mod traits;

/// Repository URL helpers.
pub mod util;
