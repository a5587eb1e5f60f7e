//! Update request and outcome types

use std::collections::BTreeSet;
use std::fmt;
use std::process::ExitCode;

/// A single invocation of the update operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Raw package tokens as supplied (empty means "update everything")
    pub packages: Vec<String>,
    /// Dependency groups activated for this operation
    pub groups: BTreeSet<String>,
    /// Compute and report the plan only
    pub dry_run: bool,
    /// Also remove environment packages absent from the resolved set
    pub sync: bool,
    /// Recompute the lockfile without touching the environment
    pub lock_only: bool,
}

impl UpdateRequest {
    /// Creates a request that updates every declared dependency
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested packages
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the activated dependency groups
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set synchronization mode
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Set lock-only mode
    pub fn with_lock_only(mut self, lock_only: bool) -> Self {
        self.lock_only = lock_only;
        self
    }

    /// Returns true if no package was named
    pub fn is_update_all(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Integer status of an update: 0 on success, 1 on validation failure,
/// otherwise whatever the installer returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateOutcome(i32);

impl UpdateOutcome {
    pub const SUCCESS: UpdateOutcome = UpdateOutcome(0);
    pub const VALIDATION_FAILURE: UpdateOutcome = UpdateOutcome(1);

    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Process exit status; codes outside `0..=255` become 1
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.0).unwrap_or(1)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<i32> for UpdateOutcome {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
