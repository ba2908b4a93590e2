//! Defines the command-line arguments for `run-tests`.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "run-tests",
    version,
    about = "Run the JSON unit test suite and report per-test results."
)]
pub struct RunTestsArgs {
    /// Suite manifest to run instead of the built-in unit suite (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Run only tests whose `Group::test` name contains this text.
    #[arg(short, long, env = "TEST_FILTER")]
    pub filter: Option<String>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Stop running tests after the first failure or error.
    #[arg(long)]
    pub fail_fast: bool,

    /// List the groups and tests of the manifest without running them.
    #[arg(long)]
    pub list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored PASS/FAIL lines and a summary.
    Human,
    /// The full report as a JSON document on stdout.
    Json,
}
