//! Update selection and installer dispatch
//!
//! A request flows through a single pass:
//! validate tokens → build the whitelist → configure the installer → run it.
//! Validation is all-or-nothing; a rejected request never reaches the installer.

use crate::domain::{DeclaredDependencySet, UpdateOutcome, UpdateRequest, Whitelist};
use crate::error::ValidationError;
use crate::installer::Installer;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

// Constraint operator characters; update only takes bare package names
static VERSION_SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[><=!~]").unwrap());

/// Returns every token that carries a version constraint operator
pub fn find_specifiers(packages: &[String]) -> Vec<String> {
    packages
        .iter()
        .filter(|p| VERSION_SPECIFIER_RE.is_match(p))
        .cloned()
        .collect()
}

/// Returns every token that is not a declared dependency, compared canonically
pub fn find_unknown(packages: &[String], declared: &DeclaredDependencySet) -> Vec<String> {
    packages
        .iter()
        .filter(|p| !declared.contains(p))
        .cloned()
        .collect()
}

/// Validates update requests against the declared dependencies and drives
/// the installer through a forced re-resolution
#[derive(Debug, Clone, Copy)]
pub struct UpdateSelector<'a> {
    declared: &'a DeclaredDependencySet,
}

impl<'a> UpdateSelector<'a> {
    pub fn new(declared: &'a DeclaredDependencySet) -> Self {
        Self { declared }
    }

    /// Validate the request and build its whitelist
    ///
    /// Returns `None` when no package was named, meaning "all declared
    /// dependencies"; no check runs in that case.
    pub fn select(&self, request: &UpdateRequest) -> Result<Option<Whitelist>, ValidationError> {
        if request.is_update_all() {
            debug!("no packages named, updating all declared dependencies");
            return Ok(None);
        }

        let with_specifiers = find_specifiers(&request.packages);
        if !with_specifiers.is_empty() {
            debug!(packages = ?with_specifiers, "rejected version specifiers");
            return Err(ValidationError::specifier_not_allowed(with_specifiers));
        }

        let unknown = find_unknown(&request.packages, self.declared);
        if !unknown.is_empty() {
            debug!(packages = ?unknown, "rejected unknown dependencies");
            return Err(ValidationError::unknown_dependency(unknown));
        }

        Ok(Some(Whitelist::from_tokens(&request.packages)))
    }

    /// Validate the request, configure the installer and run it
    ///
    /// The installer's status is returned unchanged.
    pub fn run<I>(
        &self,
        request: &UpdateRequest,
        installer: &mut I,
    ) -> Result<UpdateOutcome, ValidationError>
    where
        I: Installer + ?Sized,
    {
        let whitelist = self.select(request)?;

        if let Some(whitelist) = &whitelist {
            debug!(packages = whitelist.len(), "whitelisting requested packages");
            installer.whitelist(whitelist);
        }
        installer.only_groups(&request.groups);
        installer.dry_run(request.dry_run);
        installer.requires_synchronization(request.sync);
        installer.execute_operations(!request.lock_only);
        installer.update(true);

        info!(
            scope = whitelist.as_ref().map_or(0, Whitelist::len),
            dry_run = request.dry_run,
            sync = request.sync,
            lock_only = request.lock_only,
            "dispatching update to installer"
        );

        let outcome = UpdateOutcome::new(installer.run());
        debug!(code = outcome.code(), "installer finished");
        Ok(outcome)
    }
}

/// Run an update for `request` against the declared dependencies
pub fn run_update<I>(
    request: &UpdateRequest,
    declared: &DeclaredDependencySet,
    installer: &mut I,
) -> Result<UpdateOutcome, ValidationError>
where
    I: Installer + ?Sized,
{
    UpdateSelector::new(declared).run(request, installer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use std::collections::BTreeSet;

    /// Installer double that records every call
    #[derive(Default)]
    struct RecordingInstaller {
        calls: Vec<&'static str>,
        whitelist: Option<Whitelist>,
        groups: BTreeSet<String>,
        dry_run: bool,
        sync: bool,
        execute: Option<bool>,
        update: Option<bool>,
        status: i32,
    }

    impl RecordingInstaller {
        fn returning(status: i32) -> Self {
            Self {
                status,
                ..Default::default()
            }
        }
    }

    impl Installer for RecordingInstaller {
        fn whitelist(&mut self, packages: &Whitelist) {
            self.calls.push("whitelist");
            self.whitelist = Some(packages.clone());
        }

        fn only_groups(&mut self, groups: &BTreeSet<String>) {
            self.calls.push("only_groups");
            self.groups = groups.clone();
        }

        fn dry_run(&mut self, enabled: bool) {
            self.calls.push("dry_run");
            self.dry_run = enabled;
        }

        fn requires_synchronization(&mut self, enabled: bool) {
            self.calls.push("requires_synchronization");
            self.sync = enabled;
        }

        fn execute_operations(&mut self, enabled: bool) {
            self.calls.push("execute_operations");
            self.execute = Some(enabled);
        }

        fn update(&mut self, enabled: bool) {
            self.calls.push("update");
            self.update = Some(enabled);
        }

        fn run(&mut self) -> i32 {
            self.calls.push("run");
            self.status
        }
    }

    fn declared(names: &[&str]) -> DeclaredDependencySet {
        names.iter().collect()
    }

    #[test]
    fn test_find_specifiers() {
        let packages: Vec<String> = ["requests>2", "flask", "a==1", "b!=2", "c~=1", "d<3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            find_specifiers(&packages),
            vec!["requests>2", "a==1", "b!=2", "c~=1", "d<3"]
        );
    }

    #[test]
    fn test_specifier_rejected_without_installer() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_packages(["requests", "requestsx>2", "flask<3"]);
        let mut installer = RecordingInstaller::returning(0);

        let err = run_update(&request, &declared, &mut installer).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::SpecifierNotAllowed);
        assert_eq!(err.packages(), &["requestsx>2", "flask<3"]);
        assert_eq!(err.outcome().code(), 1);
        assert!(installer.calls.is_empty());
    }

    #[test]
    fn test_specifier_check_runs_before_membership() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_packages(["django", "flask>=2"]);
        let mut installer = RecordingInstaller::returning(0);

        let err = run_update(&request, &declared, &mut installer).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::SpecifierNotAllowed);
        assert_eq!(err.packages(), &["flask>=2"]);
    }

    #[test]
    fn test_unknown_rejected_even_with_valid_names() {
        let declared = declared(&["requests", "flask"]);
        let request = UpdateRequest::new().with_packages(["requests", "django", "numpyy"]);
        let mut installer = RecordingInstaller::returning(0);

        let err = run_update(&request, &declared, &mut installer).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::UnknownDependency);
        assert_eq!(err.packages(), &["django", "numpyy"]);
        assert!(installer.calls.is_empty());
    }

    #[test]
    fn test_membership_is_canonical() {
        let declared = declared(&["typing-extensions"]);
        let request = UpdateRequest::new().with_packages(["Typing_Extensions"]);
        let mut installer = RecordingInstaller::returning(0);

        let outcome = run_update(&request, &declared, &mut installer).unwrap();
        assert!(outcome.is_success());
        let whitelist = installer.whitelist.unwrap();
        assert_eq!(whitelist.packages(), &["Typing_Extensions"]);
    }

    #[test]
    fn test_padded_token_is_unknown() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_packages([" requests "]);
        let mut installer = RecordingInstaller::returning(0);

        let err = run_update(&request, &declared, &mut installer).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::UnknownDependency);
        assert_eq!(err.packages(), &[" requests "]);
        assert!(installer.calls.is_empty());
    }

    #[test]
    fn test_whitelist_keeps_raw_tokens_and_collapses_duplicates() {
        let declared = declared(&["requests", "flask"]);
        let request =
            UpdateRequest::new().with_packages(["Requests", "flask", "requests", "flask"]);
        let mut installer = RecordingInstaller::returning(0);

        run_update(&request, &declared, &mut installer).unwrap();
        let whitelist = installer.whitelist.unwrap();
        let pairs: Vec<_> = whitelist.iter().collect();
        assert_eq!(pairs, vec![("Requests", "*"), ("flask", "*")]);
    }

    #[test]
    fn test_update_all_skips_checks_and_whitelist() {
        let declared = DeclaredDependencySet::new();
        let request = UpdateRequest::new();
        let mut installer = RecordingInstaller::returning(0);

        run_update(&request, &declared, &mut installer).unwrap();
        assert!(installer.whitelist.is_none());
        assert_eq!(installer.update, Some(true));
    }

    #[test]
    fn test_dispatch_order_and_single_forced_update() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_packages(["requests"]);
        let mut installer = RecordingInstaller::returning(0);

        run_update(&request, &declared, &mut installer).unwrap();
        assert_eq!(
            installer.calls,
            vec![
                "whitelist",
                "only_groups",
                "dry_run",
                "requires_synchronization",
                "execute_operations",
                "update",
                "run"
            ]
        );
        assert_eq!(installer.calls.iter().filter(|c| **c == "update").count(), 1);
    }

    #[test]
    fn test_flags_forwarded() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new()
            .with_groups(["main", "dev"])
            .with_dry_run(true)
            .with_sync(true)
            .with_lock_only(true);
        let mut installer = RecordingInstaller::returning(0);

        run_update(&request, &declared, &mut installer).unwrap();
        assert!(installer.dry_run);
        assert!(installer.sync);
        assert_eq!(installer.execute, Some(false));
        assert_eq!(
            installer.groups.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["dev", "main"]
        );
    }

    #[test]
    fn test_lock_and_sync_pass_through_unchecked() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_sync(true).with_lock_only(true);
        let mut installer = RecordingInstaller::returning(0);

        let outcome = run_update(&request, &declared, &mut installer).unwrap();
        assert!(outcome.is_success());
        assert!(installer.sync);
        assert_eq!(installer.execute, Some(false));
    }

    #[test]
    fn test_installer_status_propagated() {
        let declared = declared(&["requests"]);
        let request = UpdateRequest::new().with_packages(["requests"]);

        for status in [0, 1, 2, 101] {
            let mut installer = RecordingInstaller::returning(status);
            let outcome = run_update(&request, &declared, &mut installer).unwrap();
            assert_eq!(outcome.code(), status);
        }
    }

    #[test]
    fn test_select_is_pure() {
        let declared = declared(&["requests"]);
        let selector = UpdateSelector::new(&declared);

        assert_eq!(selector.select(&UpdateRequest::new()).unwrap(), None);
        let whitelist = selector
            .select(&UpdateRequest::new().with_packages(["requests"]))
            .unwrap()
            .unwrap();
        assert_eq!(whitelist.get("requests"), Some("*"));
    }
}
