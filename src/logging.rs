//! Terminal logging setup and small log-formatting helpers.
//!
//! The active level is decided once, from an explicit [`LogConfig`], and
//! handed to [`init`]. Components only use the `log` macros.
use log::*;
use std::{env, time::Instant};

use crate::result::Result;

const SECTION_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Logger configuration built from CLI flags and the CI environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level that reaches the terminal.
    pub level: LevelFilter,
    /// Only records whose target starts with this string are printed.
    pub target: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            target: env!("CARGO_CRATE_NAME").into(),
        }
    }
}

impl LogConfig {
    /// Debug output is enabled by the `--debug` flag or by GitHub's
    /// step-debug switches (`RUNNER_DEBUG=1`, `ACTIONS_STEP_DEBUG=true`).
    pub fn from_flags(debug: bool) -> Self {
        let runner_debug = env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
        let step_debug =
            env::var("ACTIONS_STEP_DEBUG").is_ok_and(|v| v == "true");

        Self::with_debug(debug || runner_debug || step_debug)
    }

    pub fn with_debug(debug: bool) -> Self {
        let level = if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        Self {
            level,
            ..Self::default()
        }
    }

    pub fn is_debug(&self) -> bool {
        self.level >= LevelFilter::Debug
    }
}

/// Initialize terminal logger for relnotes output.
pub fn init(config: &LogConfig) -> Result<()> {
    let term_config = simplelog::ConfigBuilder::new()
        .add_filter_allow(config.target.clone())
        .build();

    simplelog::TermLogger::init(
        config.level,
        term_config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

/// Log a banner separating the phases of a run.
pub fn section(title: &str) {
    info!("");
    info!("{SECTION_RULE}");
    info!("  {title}");
    info!("{SECTION_RULE}");
    info!("");
}

pub fn success(message: &str) {
    info!("✓ {message}");
}

/// Log the outcome of a single validation check.
pub fn validation(passed: bool, message: &str) {
    if passed {
        info!("✓ {message}");
    } else {
        error!("✗ {message}");
    }
}

/// Measures how long a phase of the run takes.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("timer started: {label}");
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Report the elapsed time at debug level.
    pub fn end(self) {
        debug!("timer ended: {} ({}ms)", self.label, self.elapsed_ms());
    }

    /// Report the elapsed time at info level.
    pub fn end_with_log(self) {
        info!("{} completed in {}ms", self.label, self.elapsed_ms());
    }
}
