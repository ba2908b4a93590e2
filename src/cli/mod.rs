//! The `run-tests` command-line interface.
//!
//! This module is the main entry point for the binary and orchestrates the
//! core library functions: load the manifest, obtain the framework, run,
//! report, and turn the report into an exit status.

use std::io::Write;

use clap::Parser;
use log::error;
use termcolor::{StandardStream, WriteColor};

use crate::cli::args::{ReportFormat, RunTestsArgs};
use crate::errors::{ErrorType, SuiteError};
use crate::registry::GroupRegistry;
use crate::report::ExitStatus;
use crate::suite::TestSuiteManifest;
use crate::test::framework::InProcessFramework;
use crate::test::runner::{RunOptions, SuiteRunner};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> ExitStatus {
    let args = RunTestsArgs::parse();
    crate::logging::init(args.verbose);

    match execute(&args) {
        Ok(status) => status,
        Err(e) => {
            error!("{}", e);
            let status = exit_status_for(&e);
            eprintln!("{:?}", miette::Report::new(e));
            status
        }
    }
}

fn exit_status_for(e: &SuiteError) -> ExitStatus {
    match e.error_type() {
        ErrorType::Framework => ExitStatus::FrameworkUnavailable,
        ErrorType::Resolution | ErrorType::Configuration => ExitStatus::LoadError,
        ErrorType::Output => ExitStatus::TestFailures,
    }
}

fn execute(args: &RunTestsArgs) -> Result<ExitStatus, SuiteError> {
    let framework = InProcessFramework::obtain()?;
    let manifest = match &args.manifest {
        Some(path) => TestSuiteManifest::from_file(path)?,
        None => TestSuiteManifest::unit(),
    };
    let registry = GroupRegistry::builtin();
    let mut out = StandardStream::stdout(output::color_choice(args.no_color, atty::Stream::Stdout));

    if args.list {
        let unresolved = output::print_listing(&manifest, registry, &framework, &mut out)
            .map_err(SuiteError::report_write)?;
        return Ok(if unresolved > 0 {
            ExitStatus::LoadError
        } else {
            ExitStatus::Success
        });
    }

    let options = RunOptions {
        filter: args.filter.clone(),
        fail_fast: args.fail_fast,
    };
    let report = SuiteRunner::new(registry, &framework)
        .with_options(options)
        .run(&manifest);

    match args.format {
        ReportFormat::Human => {
            let mut err = StandardStream::stderr(output::color_choice(
                args.no_color,
                atty::Stream::Stderr,
            ));
            output::print_report(&report, &mut out, &mut err).map_err(SuiteError::report_write)?;
            err.flush().map_err(SuiteError::report_write)?;
            out.reset().map_err(SuiteError::report_write)?;
        }
        ReportFormat::Json => {
            output::print_json(&report, &mut out).map_err(SuiteError::report_write)?;
        }
    }
    out.flush().map_err(SuiteError::report_write)?;
    Ok(report.exit_status())
}
