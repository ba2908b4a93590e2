//! The test-execution capability the suite runner depends on.
//!
//! The runner only needs two things from a framework: the list of tests in a
//! group, and a way to execute one of them and capture its outcome.
//! Aggregation lives in [`crate::report`].

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::errors::SuiteError;
use crate::report::TestRecord;
use crate::test::{CaseError, TestGroup, TestMethod, TestOutcome};

pub trait TestFramework {
    /// Name used in logs and in `--list` output.
    fn name(&self) -> &str;

    /// Returns the tests registered by `group`, in registration order.
    fn discover(&self, group: &dyn TestGroup) -> Vec<TestMethod>;

    /// Runs one test to completion and records how it ended.
    fn execute(&self, group: &str, method: &TestMethod) -> TestRecord;
}

/// Runs each test on the calling thread, isolating panics with
/// `catch_unwind`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessFramework {
    _private: (),
}

impl InProcessFramework {
    /// Obtains the framework, failing when panics cannot be caught.
    ///
    /// With `panic = "abort"` one panicking test would take the whole
    /// process down, so per-test isolation is impossible.
    pub fn obtain() -> Result<Self, SuiteError> {
        if cfg!(panic = "abort") {
            return Err(SuiteError::FrameworkUnavailable {
                reason: "panics abort the process, tests cannot be isolated".to_string(),
            });
        }
        Ok(Self { _private: () })
    }
}

impl TestFramework for InProcessFramework {
    fn name(&self) -> &str {
        "in-process"
    }

    fn discover(&self, group: &dyn TestGroup) -> Vec<TestMethod> {
        let tests = group.tests();
        debug!("discovered {} test(s) in {}", tests.len(), group.name());
        tests
    }

    fn execute(&self, group: &str, method: &TestMethod) -> TestRecord {
        trace!("running {}::{}", group, method.name);
        let started = Instant::now();
        let result = isolate(|| method.call());
        let elapsed = started.elapsed();

        let record = match result {
            Ok(Ok(())) => TestRecord::new(group, &method.name, TestOutcome::Passed),
            Ok(Err(CaseError::Assertion {
                message,
                expected,
                actual,
            })) => TestRecord::new(group, &method.name, TestOutcome::Failed)
                .with_message(message)
                .with_comparison(expected, actual),
            Ok(Err(CaseError::Unexpected { message })) => {
                TestRecord::new(group, &method.name, TestOutcome::Errored).with_message(message)
            }
            Err(message) => {
                TestRecord::new(group, &method.name, TestOutcome::Errored).with_message(message)
            }
        };
        debug!("{}::{} -> {}", group, method.name, record.outcome);
        record.with_duration(elapsed)
    }
}

thread_local! {
    static ISOLATING: Cell<bool> = const { Cell::new(false) };
}

/// Wraps the previous panic hook so it stays silent while `isolate` runs on
/// the current thread. Other threads keep the usual panic output.
static QUIET_HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !ISOLATING.with(Cell::get) {
            previous(info);
        }
    }));
});

/// Runs `f`, turning a panic into a `panicked: <message>` error.
///
/// The panic is not printed by the hook; its message ends up in the report.
pub fn isolate<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    Lazy::force(&QUIET_HOOK);
    let outer = ISOLATING.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    ISOLATING.with(|flag| flag.set(outer));
    result.map_err(|payload| format!("panicked: {}", panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "non-string panic payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::CaseResult;

    fn run(body: impl Fn() -> CaseResult + 'static) -> TestRecord {
        let framework = InProcessFramework::obtain().unwrap();
        framework.execute("Group", &TestMethod::new("case", body))
    }

    #[test]
    fn ok_body_passes() {
        let record = run(|| Ok(()));
        assert_eq!(record.outcome, TestOutcome::Passed);
        assert_eq!(record.group, "Group");
        assert_eq!(record.test, "case");
        assert!(record.message.is_none());
    }

    #[test]
    fn assertion_is_a_failure_with_comparison() {
        let record = run(|| Err(CaseError::mismatch("values differ", "1", "2")));
        assert_eq!(record.outcome, TestOutcome::Failed);
        assert_eq!(record.message.as_deref(), Some("values differ"));
        assert_eq!(record.expected.as_deref(), Some("1"));
        assert_eq!(record.actual.as_deref(), Some("2"));
    }

    #[test]
    fn unexpected_error_is_recorded_as_errored() {
        let record = run(|| Err(serde_json::from_str::<u8>("nope").unwrap_err().into()));
        assert_eq!(record.outcome, TestOutcome::Errored);
        assert!(record.message.unwrap().starts_with("json:"));
    }

    #[test]
    fn isolate_returns_value_or_panic_message() {
        assert_eq!(isolate(|| 7), Ok(7));
        let err = isolate(|| -> u8 { panic!("bad {}", "load") }).unwrap_err();
        assert_eq!(err, "panicked: bad load");
        assert!(!ISOLATING.with(Cell::get));
    }

    #[test]
    fn nested_isolation_restores_outer_flag() {
        let inner = isolate(|| {
            let _ = isolate(|| panic!("inner"));
            ISOLATING.with(Cell::get)
        });
        assert_eq!(inner, Ok(true));
        assert!(!ISOLATING.with(Cell::get));
    }

    #[test]
    fn panic_is_recorded_as_errored() {
        let record = run(|| panic!("boom"));
        assert_eq!(record.outcome, TestOutcome::Errored);
        assert_eq!(record.message.as_deref(), Some("panicked: boom"));
    }
}
