//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ValidationError: Rejected update requests (bad package tokens)
//! - GroupError: Unknown dependency groups in the group selection flags
//! - ManifestError: Issues locating or parsing pyproject.toml

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::UpdateOutcome;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Update request validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Dependency group selection errors
    #[error(transparent)]
    Group(#[from] GroupError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl AppError {
    /// Exit status reported for errors raised before the installer runs
    pub fn outcome(&self) -> UpdateOutcome {
        UpdateOutcome::VALIDATION_FAILURE
    }
}

/// The kind of validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A token carries a version constraint operator
    SpecifierNotAllowed,
    /// A token is not a declared dependency of the project
    UnknownDependency,
}

/// A rejected update request, carrying every offending token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more tokens contain `>`, `<`, `=`, `!` or `~`
    #[error("version specifiers are not allowed in update: {}", .packages.join(", "))]
    SpecifierNotAllowed { packages: Vec<String> },

    /// One or more tokens are not declared dependencies
    #[error("not a dependency of this project: {}", .packages.join(", "))]
    UnknownDependency { packages: Vec<String> },
}

impl ValidationError {
    /// Creates a new SpecifierNotAllowed error
    pub fn specifier_not_allowed(packages: Vec<String>) -> Self {
        ValidationError::SpecifierNotAllowed { packages }
    }

    /// Creates a new UnknownDependency error
    pub fn unknown_dependency(packages: Vec<String>) -> Self {
        ValidationError::UnknownDependency { packages }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::SpecifierNotAllowed { .. } => ValidationErrorKind::SpecifierNotAllowed,
            ValidationError::UnknownDependency { .. } => ValidationErrorKind::UnknownDependency,
        }
    }

    /// Returns the complete list of offending tokens, in request order
    pub fn packages(&self) -> &[String] {
        match self {
            ValidationError::SpecifierNotAllowed { packages }
            | ValidationError::UnknownDependency { packages } => packages,
        }
    }

    /// Validation failures always end the command with status 1
    pub fn outcome(&self) -> UpdateOutcome {
        UpdateOutcome::VALIDATION_FAILURE
    }
}

/// A group named on the command line that the project does not declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingGroup {
    /// Group name as given
    pub name: String,
    /// The flag it was given with (`--with`, `--without`, `--only`)
    pub flag: &'static str,
}

/// Errors related to dependency group selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// One or more selected groups do not exist
    #[error("group(s) not found: {}", format_missing(.missing))]
    NotFound { missing: Vec<MissingGroup> },
}

fn format_missing(missing: &[MissingGroup]) -> String {
    missing
        .iter()
        .map(|m| format!("{} (via {})", m.name, m.flag))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("could not find pyproject.toml in {path} or its parents")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
