//! CLI argument parsing module for lockstep

use crate::domain::UpdateRequest;
use crate::installer::DEFAULT_PROGRAM;
use crate::update::GroupSelection;
use clap::{ArgAction, Parser};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Update dependencies as declared in pyproject.toml
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockstep",
    version,
    about = "Update the dependencies as declared in pyproject.toml"
)]
pub struct CliArgs {
    /// The packages to update (default: all declared dependencies)
    pub packages: Vec<String>,

    /// Project directory (pyproject.toml is searched from here upwards)
    #[arg(short = 'C', long = "directory", default_value = ".")]
    pub directory: PathBuf,

    // Group selection
    /// Optional dependency groups to include
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub with: Vec<String>,

    /// Dependency groups to exclude
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub without: Vec<String>,

    /// Only include these dependency groups
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub only: Vec<String>,

    // Operation modes
    /// Synchronize the environment with the locked packages and the selected groups
    #[arg(long)]
    pub sync: bool,

    /// Output the operations but do not execute anything (implies --verbose)
    #[arg(long)]
    pub dry_run: bool,

    /// Do not perform operations (only update the lockfile)
    #[arg(long)]
    pub lock: bool,

    // Installer configuration
    /// Resolver program that performs locking and installation
    #[arg(long, env = "LOCKSTEP_INSTALLER", default_value = DEFAULT_PROGRAM)]
    pub installer: String,

    // Output options
    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Dry runs always report what they would do
    pub fn is_verbose(&self) -> bool {
        self.verbose || self.dry_run
    }

    /// Group selection options
    pub fn group_selection(&self) -> GroupSelection {
        GroupSelection::new()
            .with_with(self.with.clone())
            .with_without(self.without.clone())
            .with_only(self.only.clone())
    }

    /// Build the update request for the given activated groups
    pub fn update_request(&self, groups: BTreeSet<String>) -> UpdateRequest {
        UpdateRequest {
            packages: self.packages.clone(),
            groups,
            dry_run: self.dry_run,
            sync: self.sync,
            lock_only: self.lock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["lockstep"]);
        assert!(args.packages.is_empty());
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.sync);
        assert!(!args.dry_run);
        assert!(!args.lock);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.with.is_empty());
        assert!(args.without.is_empty());
        assert!(args.only.is_empty());
    }

    #[test]
    fn test_packages_positional() {
        let args = CliArgs::parse_from(["lockstep", "requests", "flask"]);
        assert_eq!(args.packages, vec!["requests", "flask"]);
    }

    #[test]
    fn test_specifier_tokens_are_accepted_by_parser() {
        let args = CliArgs::parse_from(["lockstep", "requests>2"]);
        assert_eq!(args.packages, vec!["requests>2"]);
    }

    #[test]
    fn test_mode_flags() {
        let args = CliArgs::parse_from(["lockstep", "--sync", "--dry-run", "--lock"]);
        assert!(args.sync);
        assert!(args.dry_run);
        assert!(args.lock);
    }

    #[test]
    fn test_dry_run_implies_verbose() {
        let args = CliArgs::parse_from(["lockstep", "--dry-run"]);
        assert!(!args.verbose);
        assert!(args.is_verbose());
    }

    #[test]
    fn test_group_flags_comma_and_repeat() {
        let args = CliArgs::parse_from([
            "lockstep", "--with", "docs,lint", "--with", "bench", "--without", "dev",
        ]);
        assert_eq!(args.with, vec!["docs", "lint", "bench"]);
        assert_eq!(args.without, vec!["dev"]);

        let selection = args.group_selection();
        assert_eq!(selection.with, vec!["docs", "lint", "bench"]);
        assert!(selection.only.is_empty());
    }

    #[test]
    fn test_directory_flag() {
        let args = CliArgs::parse_from(["lockstep", "-C", "/some/project"]);
        assert_eq!(args.directory, PathBuf::from("/some/project"));
    }

    #[test]
    fn test_installer_flag() {
        let args = CliArgs::parse_from(["lockstep", "--installer", "/opt/uv"]);
        assert_eq!(args.installer, "/opt/uv");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["lockstep", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request() {
        let args = CliArgs::parse_from(["lockstep", "requests", "--lock", "--sync"]);
        let groups: BTreeSet<String> = ["main".to_string()].into_iter().collect();
        let request = args.update_request(groups);
        assert_eq!(request.packages, vec!["requests"]);
        assert!(request.lock_only);
        assert!(request.sync);
        assert!(!request.dry_run);
        assert!(request.groups.contains("main"));
    }
}
