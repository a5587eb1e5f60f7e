//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Validation error display listing every offending package
//! - Unknown group display
//! - Installer plan display for dry runs and verbose mode

use crate::error::{GroupError, ValidationError};
use crate::installer::{InstallerCommand, InstallerDirective};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn error_line(&self, message: &str) -> String {
        if self.color {
            message.red().bold().to_string()
        } else {
            message.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render a rejected update request
    pub fn format_validation_error(
        &self,
        error: &ValidationError,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match error {
            ValidationError::SpecifierNotAllowed { packages } => {
                writeln!(
                    writer,
                    "{}",
                    self.error_line("Version specifiers are not allowed in update.")
                )?;
                for package in packages {
                    writeln!(writer, "  - {}", self.highlight(package))?;
                }
                writeln!(
                    writer,
                    "Change the constraint in {} to update to a different version range.",
                    self.highlight("pyproject.toml")
                )
            }
            ValidationError::UnknownDependency { packages } => writeln!(
                writer,
                "{}",
                self.error_line(&format!(
                    "The following packages are not dependencies of this project: {}",
                    packages.join(", ")
                ))
            ),
        }
    }

    /// Render unknown dependency groups
    pub fn format_group_error(
        &self,
        error: &GroupError,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let GroupError::NotFound { missing } = error;
        let listed = missing
            .iter()
            .map(|m| format!("{} (via {})", self.highlight(&m.name), m.flag))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "{} {}", self.error_line("Group(s) not found:"), listed)
    }

    /// Render the installer steps about to run
    pub fn format_plan(
        &self,
        plan: &[InstallerCommand],
        directive: &InstallerDirective,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let header = if directive.dry_run {
            "Planned operations (dry-run):"
        } else {
            "Operations:"
        };
        if self.color {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }

        let scope = if directive.whitelist.is_empty() {
            "all dependencies".to_string()
        } else {
            directive.whitelist.packages().join(", ")
        };
        writeln!(writer, "  Update scope: {}", scope)?;

        if !directive.groups.is_empty() {
            let groups: Vec<&str> = directive.groups.iter().map(String::as_str).collect();
            writeln!(writer, "  Groups: {}", groups.join(", "))?;
        }

        for command in plan {
            writeln!(writer, "  $ {}", self.highlight(&command.to_string()))?;
        }

        if !directive.execute_operations {
            writeln!(writer, "  (lockfile only, environment untouched)")?;
        }

        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}
