//! Declared dependency information structures

use super::package_name::PackageName;
use std::collections::BTreeSet;
use std::fmt;

/// Name of the implicit group holding the project's main dependencies
pub const MAIN_GROUP: &str = "main";

/// A named subset of declared dependencies (e.g. `dev`, `test`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    /// Group name as written in the manifest
    pub name: String,
    /// Optional groups are only activated when requested explicitly
    pub optional: bool,
    /// Canonical names of the group's dependencies
    pub dependencies: BTreeSet<PackageName>,
}

impl DependencyGroup {
    /// Creates an empty, non-optional group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            dependencies: BTreeSet::new(),
        }
    }

    /// Creates the main group
    pub fn main() -> Self {
        Self::new(MAIN_GROUP)
    }

    /// Marks the group optional (builder pattern)
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Adds a dependency by raw name (builder pattern)
    pub fn with_dependency(mut self, name: &str) -> Self {
        self.add(name);
        self
    }

    /// Adds a dependency by raw name
    pub fn add(&mut self, name: &str) {
        self.dependencies.insert(PackageName::new(name));
    }

    pub fn is_main(&self) -> bool {
        self.name == MAIN_GROUP
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional_marker = if self.optional { " (optional)" } else { "" };
        write!(
            f,
            "{}{} [{} dependencies]",
            self.name,
            optional_marker,
            self.dependencies.len()
        )
    }
}

/// Canonical names of every dependency the project declares, across all groups
///
/// Read-only for the duration of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependencySet {
    names: BTreeSet<PackageName>,
}

impl DeclaredDependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the union of all groups' dependencies
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a DependencyGroup>) -> Self {
        Self {
            names: groups
                .into_iter()
                .flat_map(|g| g.dependencies.iter().cloned())
                .collect(),
        }
    }

    /// Returns true if the raw name is declared, compared canonically
    pub fn contains(&self, raw: &str) -> bool {
        self.names.contains(&PackageName::new(raw))
    }

}

impl<S: AsRef<str>> FromIterator<S> for DeclaredDependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|s| PackageName::new(s.as_ref()))
                .collect(),
        }
    }
}
