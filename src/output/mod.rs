//! Output formatting for the update command
//!
//! Error rendering lives here so the selector only returns structured errors.

mod text;

pub use text::TextFormatter;

use crate::error::{AppError, GroupError, ValidationError};
use crate::installer::{InstallerCommand, InstallerDirective};
use std::io::Write;

/// Render a validation failure with the default formatter
pub fn render_validation_error(
    error: &ValidationError,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    TextFormatter::default().format_validation_error(error, writer)
}

/// Render a group selection failure with the default formatter
pub fn render_group_error(error: &GroupError, writer: &mut dyn Write) -> std::io::Result<()> {
    TextFormatter::default().format_group_error(error, writer)
}

/// Render the installer plan with the default formatter
pub fn render_plan(
    plan: &[InstallerCommand],
    directive: &InstallerDirective,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    TextFormatter::default().format_plan(plan, directive, writer)
}

/// Render any error raised before the installer runs
pub fn render_error(error: &AppError, writer: &mut dyn Write) -> std::io::Result<()> {
    match error {
        AppError::Validation(e) => render_validation_error(e, writer),
        AppError::Group(e) => render_group_error(e, writer),
        AppError::Manifest(e) => writeln!(writer, "Error: {}", e),
    }
}
