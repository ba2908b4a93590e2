//! A declarative suite runner for the JSON unit test groups.
//!
//! The unit suite is a fixed manifest, `PrettyPrintTest` then `SandboxTest`.
//! [`run_suite`] resolves each entry through the built-in
//! [`GroupRegistry`], executes its tests with the in-process framework and
//! returns the aggregated [`SuiteReport`].
//!
//! ```no_run
//! let report = jsonsuite::run_suite()?;
//! std::process::exit(report.exit_status().code());
//! # Ok::<(), jsonsuite::SuiteError>(())
//! ```

pub use crate::errors::{ErrorType, SuiteError};
pub use crate::registry::GroupRegistry;
pub use crate::report::{ExitStatus, SuiteReport, TestRecord, TestSummary};
pub use crate::suite::TestSuiteManifest;

pub mod cli;
pub mod errors;
pub mod groups;
pub mod logging;
pub mod registry;
pub mod report;
pub mod suite;

use crate::test::framework::InProcessFramework;
use crate::test::runner::SuiteRunner;

/// Runs the built-in unit suite.
///
/// Fails only when the test framework itself cannot be obtained; every other
/// problem is part of the returned report.
pub fn run_suite() -> Result<SuiteReport, SuiteError> {
    let framework = InProcessFramework::obtain()?;
    let manifest = TestSuiteManifest::unit();
    Ok(SuiteRunner::new(GroupRegistry::builtin(), &framework).run(&manifest))
}
