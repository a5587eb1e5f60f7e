//! Installer backed by an external resolver binary
//!
//! The directive is translated into `lock` and `sync` invocations of a
//! `uv`-compatible command line:
//! - `lock` always runs, with `--upgrade-package`/`--upgrade` when forced
//! - `sync --frozen` runs when operations execute
//!
//! A dry run passes `--dry-run` to both steps. Its `sync` step resolves on
//! its own instead of reading the untouched lockfile, so it reports the
//! environment changes the real run would make.

use super::{Installer, InstallerDirective};
use crate::domain::{Whitelist, MAIN_GROUP};
use crate::output;
use crate::progress::Progress;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// Resolver binary used when none is configured
pub const DEFAULT_PROGRAM: &str = "uv";

/// A single external command in the installer plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallerCommand {
    fn new(program: &str, subcommand: &str) -> Self {
        Self {
            program: program.to_string(),
            args: vec![subcommand.to_string()],
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The subcommand this step runs (`lock` or `sync`)
    pub fn step(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    fn execute(&self, working_dir: &Path) -> io::Result<Output> {
        Command::new(&self.program)
            .args(&self.args)
            .current_dir(working_dir)
            .output()
    }
}

impl fmt::Display for InstallerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Installer that runs an external resolver in the project directory
#[derive(Debug)]
pub struct CommandInstaller {
    program: String,
    working_dir: PathBuf,
    directive: InstallerDirective,
    verbose: bool,
    quiet: bool,
}

impl CommandInstaller {
    /// Create an installer running `program` from `working_dir`
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            directive: InstallerDirective::default(),
            verbose: false,
            quiet: false,
        }
    }

    /// Print the plan and every step's output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Suppress the spinner and successful step output
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Returns the directive accumulated so far
    pub fn directive(&self) -> &InstallerDirective {
        &self.directive
    }

    /// Translate the current directive into the commands `run` will execute
    pub fn plan(&self) -> Vec<InstallerCommand> {
        let mut plan = vec![self.lock_command()];

        if self.directive.execute_operations {
            plan.push(self.sync_command());
        }

        plan
    }

    fn with_upgrade_args(&self, mut command: InstallerCommand) -> InstallerCommand {
        let directive = &self.directive;
        if !directive.update {
            return command;
        }

        if directive.whitelist.is_empty() {
            command = command.arg("--upgrade");
        } else {
            for package in directive.whitelist.packages() {
                command = command.arg("--upgrade-package").arg(package);
            }
        }
        command
    }

    fn lock_command(&self) -> InstallerCommand {
        let mut lock = self.with_upgrade_args(InstallerCommand::new(&self.program, "lock"));

        if self.directive.dry_run {
            lock = lock.arg("--dry-run");
        }

        lock
    }

    fn sync_command(&self) -> InstallerCommand {
        let directive = &self.directive;
        let mut sync = InstallerCommand::new(&self.program, "sync");
        sync = if directive.dry_run {
            self.with_upgrade_args(sync)
        } else {
            sync.arg("--frozen")
        };

        if !directive.groups.is_empty() {
            if directive.groups.contains(MAIN_GROUP) {
                sync = sync.arg("--no-default-groups");
                for group in directive.groups.iter().filter(|g| *g != MAIN_GROUP) {
                    sync = sync.arg("--group").arg(group);
                }
            } else {
                for group in &directive.groups {
                    sync = sync.arg("--only-group").arg(group);
                }
            }
        }

        if !directive.synchronize {
            sync = sync.arg("--inexact");
        }

        if directive.dry_run {
            sync = sync.arg("--dry-run");
        }

        sync
    }

    fn forward(&self, output: &Output, failed: bool) {
        if self.quiet && !failed {
            return;
        }
        // Losing forwarded output must not change the outcome
        let _ = io::stdout().write_all(&output.stdout);
        let _ = io::stderr().write_all(&output.stderr);
    }
}

impl Installer for CommandInstaller {
    fn whitelist(&mut self, packages: &Whitelist) {
        self.directive.whitelist = packages.clone();
    }

    fn only_groups(&mut self, groups: &BTreeSet<String>) {
        self.directive.groups = groups.clone();
    }

    fn dry_run(&mut self, enabled: bool) {
        self.directive.dry_run = enabled;
    }

    fn requires_synchronization(&mut self, enabled: bool) {
        self.directive.synchronize = enabled;
    }

    fn execute_operations(&mut self, enabled: bool) {
        self.directive.execute_operations = enabled;
    }

    fn update(&mut self, enabled: bool) {
        self.directive.update = enabled;
    }

    fn run(&mut self) -> i32 {
        let plan = self.plan();
        debug!(steps = plan.len(), directive = ?self.directive, "installer plan built");

        if self.verbose || self.directive.dry_run {
            let mut stderr = io::stderr().lock();
            let _ = output::render_plan(&plan, &self.directive, &mut stderr);
        }

        for command in &plan {
            info!(command = %command, "running installer step");

            let mut progress = Progress::new(!self.quiet);
            progress.start_step(command.step());
            let result = command.execute(&self.working_dir);
            progress.finish_step();

            match result {
                Ok(out) if out.status.success() => self.forward(&out, false),
                Ok(out) => {
                    self.forward(&out, true);
                    let code = out.status.code().unwrap_or(1);
                    warn!(command = %command, code, "installer step failed");
                    return code;
                }
                Err(e) => {
                    warn!(command = %command, error = %e, "failed to start installer");
                    eprintln!("Failed to execute {}: {}", command, e);
                    return 1;
                }
            }
        }

        0
    }
}
