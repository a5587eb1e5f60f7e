//! Dependency group selection
//!
//! This module provides the GroupSelection struct that turns the
//! `--with`, `--without` and `--only` options into the set of activated groups.

use crate::domain::DependencyGroup;
use crate::error::{GroupError, MissingGroup};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Group selection options for an update
#[derive(Debug, Clone, Default)]
pub struct GroupSelection {
    /// Optional groups to activate in addition to the defaults
    pub with: Vec<String>,
    /// Groups to leave out
    pub without: Vec<String>,
    /// If non-empty, activate exactly these groups
    pub only: Vec<String>,
}

impl GroupSelection {
    /// Create a selection that activates every non-optional group
    pub fn new() -> Self {
        Self::default()
    }

    /// Set groups to add
    pub fn with_with(mut self, with: Vec<String>) -> Self {
        self.with = with;
        self
    }

    /// Set groups to remove
    pub fn with_without(mut self, without: Vec<String>) -> Self {
        self.without = without;
        self
    }

    /// Set the exclusive group list
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Compute the activated groups against the project's declared groups
    ///
    /// Every group named in any option must exist; all missing groups are
    /// reported together.
    pub fn activated<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a DependencyGroup>,
    ) -> Result<BTreeSet<String>, GroupError> {
        let groups: BTreeMap<&str, &DependencyGroup> =
            groups.into_iter().map(|g| (g.name.as_str(), g)).collect();

        self.check_exists(&groups)?;

        if !self.only.is_empty() {
            if self.only_overrides_others() {
                warn!("--with and --without are ignored when --only is given");
            }
            return Ok(self.only.iter().map(|g| g.trim().to_string()).collect());
        }

        let mut activated: BTreeSet<String> = groups
            .values()
            .filter(|g| !g.optional)
            .map(|g| g.name.clone())
            .collect();
        activated.extend(self.with.iter().map(|g| g.trim().to_string()));
        for group in &self.without {
            activated.remove(group.trim());
        }

        Ok(activated)
    }

    /// Returns true if `--with`/`--without` were given but `--only` wins
    pub fn only_overrides_others(&self) -> bool {
        !self.only.is_empty() && (!self.with.is_empty() || !self.without.is_empty())
    }

    fn check_exists(&self, groups: &BTreeMap<&str, &DependencyGroup>) -> Result<(), GroupError> {
        let mut missing: Vec<MissingGroup> = Vec::new();
        let options = [
            ("--with", &self.with),
            ("--without", &self.without),
            ("--only", &self.only),
        ];

        for (flag, names) in options {
            for name in names.iter().map(|n| n.trim()) {
                let already_listed = missing.iter().any(|m| m.name == name && m.flag == flag);
                if !groups.contains_key(name) && !already_listed {
                    missing.push(MissingGroup {
                        name: name.to_string(),
                        flag,
                    });
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GroupError::NotFound { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_groups() -> Vec<DependencyGroup> {
        vec![
            DependencyGroup::main().with_dependency("requests"),
            DependencyGroup::new("dev").with_dependency("pytest"),
            DependencyGroup::new("docs")
                .with_optional(true)
                .with_dependency("sphinx"),
        ]
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_excludes_optional() {
        let groups = project_groups();
        let activated = GroupSelection::new().activated(&groups).unwrap();
        assert_eq!(names(&activated), vec!["dev", "main"]);
    }

    #[test]
    fn test_with_adds_optional_group() {
        let groups = project_groups();
        let activated = GroupSelection::new()
            .with_with(strings(&["docs"]))
            .activated(&groups)
            .unwrap();
        assert_eq!(names(&activated), vec!["dev", "docs", "main"]);
    }

    #[test]
    fn test_without_removes_group() {
        let groups = project_groups();
        let activated = GroupSelection::new()
            .with_without(strings(&["dev"]))
            .activated(&groups)
            .unwrap();
        assert_eq!(names(&activated), vec!["main"]);
    }

    #[test]
    fn test_only_overrides_defaults() {
        let groups = project_groups();
        let activated = GroupSelection::new()
            .with_only(strings(&["docs"]))
            .with_with(strings(&["dev"]))
            .activated(&groups)
            .unwrap();
        assert_eq!(names(&activated), vec!["docs"]);
    }

    #[test]
    fn test_only_overriding_with_and_without_is_flagged() {
        let groups = project_groups();
        let selection = GroupSelection::new()
            .with_only(strings(&["dev"]))
            .with_without(strings(&["dev"]));
        assert!(selection.only_overrides_others());
        assert_eq!(names(&selection.activated(&groups).unwrap()), vec!["dev"]);

        assert!(!GroupSelection::new()
            .with_only(strings(&["dev"]))
            .only_overrides_others());
        assert!(!GroupSelection::new()
            .with_with(strings(&["docs"]))
            .only_overrides_others());
    }

    #[test]
    fn test_unknown_groups_reported_together() {
        let groups = project_groups();
        let err = GroupSelection::new()
            .with_with(strings(&["lint", "lint"]))
            .with_only(strings(&["bench"]))
            .activated(&groups)
            .unwrap_err();

        let GroupError::NotFound { missing } = err;
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0].name, "lint");
        assert_eq!(missing[0].flag, "--with");
        assert_eq!(missing[1].name, "bench");
        assert_eq!(missing[1].flag, "--only");
    }
}
