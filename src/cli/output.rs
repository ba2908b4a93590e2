//! Handles all user-facing output for the CLI.
//!
//! Passing and skipped tests plus the summary go to `out`; failure details,
//! load errors and diffs go to `err`. Both are `WriteColor` sinks so the
//! same code drives the terminal and the in-memory buffers used in tests.

use std::io::{self, Write};

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::registry::GroupRegistry;
use crate::report::{EntryStatus, SuiteReport, TestRecord};
use crate::suite::TestSuiteManifest;
use crate::test::framework::TestFramework;
use crate::test::runner::load_group;
use crate::test::TestOutcome;

/// Picks a color mode for one output stream: colors only when that stream is
/// a terminal, and never when disabled explicitly.
pub fn color_choice(no_color: bool, stream: atty::Stream) -> ColorChoice {
    choose_color(no_color, atty::is(stream))
}

fn choose_color(no_color: bool, is_terminal: bool) -> ColorChoice {
    if no_color || !is_terminal {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn outcome_color(outcome: TestOutcome) -> Color {
    match outcome {
        TestOutcome::Passed => Color::Green,
        TestOutcome::Failed => Color::Red,
        TestOutcome::Errored => Color::Magenta,
        TestOutcome::Skipped => Color::Yellow,
    }
}

fn write_label(w: &mut dyn WriteColor, label: &str, color: Color) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "{}", label)?;
    w.reset()
}

/// Prints every record, load errors, and the closing summary.
pub fn print_report(
    report: &SuiteReport,
    out: &mut dyn WriteColor,
    err: &mut dyn WriteColor,
) -> io::Result<()> {
    for entry in &report.entries {
        match &entry.status {
            EntryStatus::Resolved { tests } => {
                for record in tests {
                    print_record(record, out, err)?;
                }
            }
            EntryStatus::LoadError { message } => {
                write_label(err, "LOAD", Color::Red)?;
                writeln!(err, ": {}", entry.group)?;
                writeln!(err, "  Error: {}", message)?;
            }
        }
    }

    let summary = report.summary();
    writeln!(out)?;
    write!(out, "{} summary: {} run, ", report.suite, summary.run)?;
    write_label(out, "passed", Color::Green)?;
    write!(out, " {}, ", summary.passed)?;
    write_label(out, "failed", Color::Red)?;
    write!(out, " {}, ", summary.failed)?;
    write_label(out, "errored", Color::Magenta)?;
    write!(out, " {}, ", summary.errored)?;
    write_label(out, "skipped", Color::Yellow)?;
    writeln!(out, " {}", summary.skipped)?;
    if summary.load_errors > 0 {
        writeln!(out, "{} group(s) could not be loaded", summary.load_errors)?;
    }

    let problems: Vec<_> = report
        .records()
        .filter(|r| r.outcome.is_problem())
        .collect();
    if !problems.is_empty() {
        writeln!(err, "\nFailed tests:")?;
        for record in problems {
            writeln!(err, "  - {} ({})", record.qualified_name(), record.outcome)?;
        }
    }
    Ok(())
}

fn print_record(
    record: &TestRecord,
    out: &mut dyn WriteColor,
    err: &mut dyn WriteColor,
) -> io::Result<()> {
    let color = outcome_color(record.outcome);
    if !record.outcome.is_problem() {
        write_label(out, record.outcome.label(), color)?;
        write!(out, ": {}", record.qualified_name())?;
        if let Some(reason) = &record.message {
            write!(out, " ({})", reason)?;
        }
        return writeln!(out);
    }

    write_label(err, record.outcome.label(), color)?;
    writeln!(err, ": {}", record.qualified_name())?;
    if let Some(message) = &record.message {
        writeln!(err, "  Error: {}", message)?;
    }
    if let (Some(expected), Some(actual)) = (&record.expected, &record.actual) {
        writeln!(err, "  Diff:")?;
        print_diff(err, expected, actual)?;
    }
    Ok(())
}

/// Line diff between expected and actual text.
fn print_diff(w: &mut dyn WriteColor, expected: &str, actual: &str) -> io::Result<()> {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                w.reset()?;
                for line in x.lines() {
                    writeln!(w, "    {}", line)?;
                }
            }
            Difference::Rem(x) => {
                w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                for line in x.lines() {
                    writeln!(w, "  - {}", line)?;
                }
            }
            Difference::Add(x) => {
                w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                for line in x.lines() {
                    writeln!(w, "  + {}", line)?;
                }
            }
        }
    }
    w.reset()
}

/// Writes the report as a JSON document. No color codes are emitted, even
/// on a color-capable sink.
pub fn print_json(report: &SuiteReport, out: &mut dyn WriteColor) -> io::Result<()> {
    let json = report.to_json()?;
    writeln!(out, "{}", json)
}

/// Prints each manifest entry with the tests it registers.
pub fn print_listing(
    manifest: &TestSuiteManifest,
    registry: &GroupRegistry,
    framework: &dyn TestFramework,
    out: &mut dyn WriteColor,
) -> io::Result<usize> {
    let mut unresolved = 0;
    writeln!(out, "{}:", manifest.name())?;
    for entry in manifest.groups() {
        match load_group(registry, framework, entry) {
            Ok(methods) => {
                writeln!(out, "  {}", entry)?;
                for method in methods {
                    writeln!(out, "    {}", method.name)?;
                }
            }
            Err(e) => {
                unresolved += 1;
                write!(out, "  {} ", entry)?;
                write_label(out, "(unresolved)", Color::Red)?;
                writeln!(out, " {}", e)?;
            }
        }
    }
    Ok(unresolved)
}
