//! Aggregated results of one suite invocation.

use std::time::Duration;

use serde::Serialize;

use crate::errors::SuiteError;
use crate::test::TestOutcome;

/// Outcome of a single test, with enough detail to explain a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRecord {
    pub group: String,
    pub test: String,
    pub outcome: TestOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl TestRecord {
    pub fn new(group: &str, test: &str, outcome: TestOutcome) -> Self {
        Self {
            group: group.to_string(),
            test: test.to_string(),
            outcome,
            message: None,
            expected: None,
            actual: None,
            duration: Duration::ZERO,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_comparison(mut self, expected: Option<String>, actual: Option<String>) -> Self {
        self.expected = expected;
        self.actual = actual;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// `Group::test`, the form used by filters and in the printed report.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.group, self.test)
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

/// What happened to one manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    Resolved { tests: Vec<TestRecord> },
    LoadError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub group: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

impl EntryReport {
    pub fn resolved(group: impl Into<String>, tests: Vec<TestRecord>) -> Self {
        Self {
            group: group.into(),
            status: EntryStatus::Resolved { tests },
        }
    }

    pub fn load_error(group: impl Into<String>, error: &SuiteError) -> Self {
        Self {
            group: group.into(),
            status: EntryStatus::LoadError {
                message: error.to_string(),
            },
        }
    }

    pub fn records(&self) -> &[TestRecord] {
        match &self.status {
            EntryStatus::Resolved { tests } => tests.as_slice(),
            EntryStatus::LoadError { .. } => &[],
        }
    }

    pub fn is_load_error(&self) -> bool {
        matches!(self.status, EntryStatus::LoadError { .. })
    }
}

/// Counts derived from a [`SuiteReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestSummary {
    pub run: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub load_errors: usize,
}

impl TestSummary {
    pub fn has_problems(&self) -> bool {
        self.failed > 0 || self.errored > 0
    }

    pub fn success_rate(&self) -> f64 {
        if self.run == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.run as f64) * 100.0
    }
}

/// How a run should be reported to the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    TestFailures,
    LoadError,
    FrameworkUnavailable,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::TestFailures => 1,
            ExitStatus::LoadError => 2,
            ExitStatus::FrameworkUnavailable => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub entries: Vec<EntryReport>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            entries: Vec::new(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &TestRecord> {
        self.entries.iter().flat_map(|e| e.records())
    }

    pub fn load_errors(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| e.is_load_error())
    }

    pub fn summary(&self) -> TestSummary {
        let mut summary = TestSummary {
            load_errors: self.load_errors().count(),
            ..TestSummary::default()
        };
        for record in self.records() {
            match record.outcome {
                TestOutcome::Passed => summary.passed += 1,
                TestOutcome::Failed => summary.failed += 1,
                TestOutcome::Errored => summary.errored += 1,
                TestOutcome::Skipped => summary.skipped += 1,
            }
            if record.outcome.was_run() {
                summary.run += 1;
            }
        }
        summary
    }

    /// Load errors outrank test failures.
    pub fn exit_status(&self) -> ExitStatus {
        let summary = self.summary();
        if summary.load_errors > 0 {
            ExitStatus::LoadError
        } else if summary.has_problems() {
            ExitStatus::TestFailures
        } else {
            ExitStatus::Success
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Document<'a> {
            #[serde(flatten)]
            report: &'a SuiteReport,
            summary: TestSummary,
        }
        serde_json::to_string_pretty(&Document {
            report: self,
            summary: self.summary(),
        })
    }
}
