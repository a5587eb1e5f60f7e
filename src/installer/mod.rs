//! Installer integration
//!
//! This module provides:
//! - The `Installer` capability consumed by the update selector
//! - `InstallerDirective`, the accumulated settings an installer runs with
//! - `CommandInstaller`, which drives an external resolver binary

mod command;

pub use command::{CommandInstaller, InstallerCommand, DEFAULT_PROGRAM};

use crate::domain::Whitelist;
use std::collections::BTreeSet;

/// Capability interface of the component that resolves, locks and installs
///
/// Setters accumulate a directive; `run` performs the work and returns an
/// integer status (0 success, non-zero failure).
pub trait Installer {
    /// Restrict the forced-update scope to these packages
    fn whitelist(&mut self, packages: &Whitelist);

    /// Limit resolution and installation to these dependency groups
    fn only_groups(&mut self, groups: &BTreeSet<String>);

    /// Compute and report the plan without mutating anything
    fn dry_run(&mut self, enabled: bool);

    /// Also remove environment packages absent from the resolved set
    fn requires_synchronization(&mut self, enabled: bool);

    /// When false, write the lockfile only
    fn execute_operations(&mut self, enabled: bool);

    /// Ignore existing lock pins for the selection scope
    fn update(&mut self, enabled: bool);

    /// Perform resolution and, optionally, environment changes
    fn run(&mut self) -> i32;
}

/// Settings accumulated through the `Installer` setters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerDirective {
    pub whitelist: Whitelist,
    pub groups: BTreeSet<String>,
    pub dry_run: bool,
    pub synchronize: bool,
    pub execute_operations: bool,
    pub update: bool,
}

impl Default for InstallerDirective {
    fn default() -> Self {
        Self {
            whitelist: Whitelist::new(),
            groups: BTreeSet::new(),
            dry_run: false,
            synchronize: false,
            execute_operations: true,
            update: false,
        }
    }
}
