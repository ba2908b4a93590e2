//! Error types for suite loading and execution.
//!
//! Per-test failures are not errors at this level: they are captured as
//! [`CaseError`](crate::test::CaseError) values and folded into the report.
//! [`SuiteError`] covers everything that happens around the tests: manifest
//! entries that cannot be resolved, manifest files that cannot be read, and
//! a test framework that cannot be obtained at all.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe classification of [`SuiteError`] variants.
///
/// The CLI maps these onto process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A manifest entry could not be located or failed to load.
    Resolution,
    /// The manifest itself is unreadable, malformed or empty.
    Configuration,
    /// The test-execution capability is missing.
    Framework,
    /// The report could not be written out.
    Output,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Resolution => "Resolution",
            ErrorType::Configuration => "Configuration",
            ErrorType::Framework => "Framework",
            ErrorType::Output => "Output",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SuiteError {
    #[error("cannot resolve test group '{group}': {reason}")]
    #[diagnostic(code(jsonsuite::manifest::resolution))]
    ManifestResolution {
        group: String,
        reason: String,
        #[help]
        known: String,
    },

    #[error("invalid suite manifest: {message}")]
    #[diagnostic(code(jsonsuite::manifest::invalid))]
    InvalidManifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("failed to read manifest file '{}'", path.display())]
    #[diagnostic(code(jsonsuite::manifest::io))]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("test framework unavailable: {reason}")]
    #[diagnostic(
        code(jsonsuite::framework::unavailable),
        help("rebuild with the default `panic = \"unwind\"` strategy")
    )]
    FrameworkUnavailable { reason: String },

    #[error("failed to write report")]
    #[diagnostic(code(jsonsuite::report::write))]
    ReportWrite {
        #[source]
        source: std::io::Error,
    },
}

impl SuiteError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            SuiteError::ManifestResolution { .. } => ErrorType::Resolution,
            SuiteError::InvalidManifest { .. } | SuiteError::ManifestIo { .. } => {
                ErrorType::Configuration
            }
            SuiteError::FrameworkUnavailable { .. } => ErrorType::Framework,
            SuiteError::ReportWrite { .. } => ErrorType::Output,
        }
    }

    pub(crate) fn report_write(source: std::io::Error) -> Self {
        SuiteError::ReportWrite { source }
    }

    pub(crate) fn unresolved<'a>(
        group: &str,
        reason: impl Into<String>,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        SuiteError::ManifestResolution {
            group: group.to_string(),
            reason: reason.into(),
            known: format!(
                "registered groups: {}",
                known.into_iter().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    pub(crate) fn invalid_manifest(message: impl Into<String>) -> Self {
        SuiteError::InvalidManifest {
            message: message.into(),
            help: None,
        }
    }
}
