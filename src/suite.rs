//! The suite manifest: which groups make up a run, in which order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SuiteError;
use crate::groups;

/// The unit test suite, as declared.
pub const UNIT_SUITE: &str = "UnitTestSuite";

const UNIT_GROUPS: &[&str] = &[groups::pretty_print::GROUP_NAME, groups::sandbox::GROUP_NAME];

/// An ordered, non-empty list of test-group identifiers.
///
/// Entries are treated as independent; their order is preserved in the
/// report but carries no shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuiteManifest {
    name: String,
    groups: Vec<String>,
}

impl TestSuiteManifest {
    pub fn new<I, S>(name: impl Into<String>, groups: I) -> Result<Self, SuiteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let manifest = Self {
            name: name.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// The built-in unit suite: `PrettyPrintTest` then `SandboxTest`.
    pub fn unit() -> Self {
        Self {
            name: UNIT_SUITE.to_string(),
            groups: UNIT_GROUPS.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Loads a manifest from a YAML or JSON file, chosen by extension.
    ///
    /// ```yaml
    /// name: UnitTestSuite
    /// groups:
    ///   - PrettyPrintTest
    ///   - SandboxTest
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, SuiteError> {
        let content = fs::read_to_string(path).map_err(|source| SuiteError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let manifest: Self = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| SuiteError::invalid_manifest(format!("{}: {}", path.display(), e)))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| SuiteError::invalid_manifest(format!("{}: {}", path.display(), e)))?
        };
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), SuiteError> {
        if self.groups.is_empty() {
            return Err(SuiteError::InvalidManifest {
                message: format!("suite '{}' lists no test groups", self.name),
                help: Some("add at least one entry under `groups`".to_string()),
            });
        }
        if let Some(blank) = self.groups.iter().position(|g| g.trim().is_empty()) {
            return Err(SuiteError::invalid_manifest(format!(
                "entry {} of suite '{}' is blank",
                blank, self.name
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false for a validated manifest.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for TestSuiteManifest {
    fn default() -> Self {
        Self::unit()
    }
}
