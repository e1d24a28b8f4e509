//! Result type used throughout relnotes.
//!
//! Every fallible operation returns [`Result`], an alias for
//! `color_eyre::eyre::Result`. Typed failures live in [`crate::error`] and
//! are converted into an eyre report with `?`, so callers can still
//! `downcast_ref` them when they need to branch on the cause (the retry
//! classifier does this for [`crate::error::ForgeError`]).
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn read_changelog(path: &Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err("failed to read changelog")?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout relnotes.
pub type Result<T> = EyreResult<T>;
