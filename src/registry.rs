//! Explicit registration of test groups.
//!
//! A manifest names groups by identifier; the registry turns an identifier
//! into a loaded [`TestGroup`]. Loading may fail, for example when a group's
//! fixture cannot be parsed, and that failure is reported the same way as an
//! unknown identifier.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::errors::SuiteError;
use crate::groups;
use crate::test::TestGroup;

pub type GroupLoader = fn() -> Result<Box<dyn TestGroup>, SuiteError>;

#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    loaders: BTreeMap<String, GroupLoader>,
}

static BUILTIN: Lazy<GroupRegistry> = Lazy::new(|| {
    let mut registry = GroupRegistry::new();
    registry.register(groups::pretty_print::GROUP_NAME, groups::pretty_print::load);
    registry.register(groups::sandbox::GROUP_NAME, groups::sandbox::load);
    registry
});

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry of the groups shipped with this crate.
    pub fn builtin() -> &'static GroupRegistry {
        &BUILTIN
    }

    /// Registers `loader` under `name`, replacing any previous loader.
    pub fn register(&mut self, name: impl Into<String>, loader: GroupLoader) -> &mut Self {
        self.loaders.insert(name.into(), loader);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    /// Locates and loads the group registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn TestGroup>, SuiteError> {
        let Some(loader) = self.loaders.get(name) else {
            return Err(SuiteError::unresolved(name, "not registered", self.names()));
        };
        loader().map_err(|e| match e {
            SuiteError::ManifestResolution { .. } => e,
            other => SuiteError::unresolved(name, other.to_string(), self.names()),
        })
    }
}
