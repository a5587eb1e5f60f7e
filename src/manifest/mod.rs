//! Project manifest discovery and parsing
//!
//! This module provides functionality to:
//! - Locate pyproject.toml from a directory upwards
//! - Parse the project's dependency groups
//! - Derive the declared dependency set used to validate update requests

mod pyproject_toml;

pub use pyproject_toml::{parse_groups, requirement_name};

use crate::domain::{DeclaredDependencySet, DependencyGroup};
use crate::error::ManifestError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the project manifest
pub const MANIFEST_FILENAME: &str = "pyproject.toml";

/// Find pyproject.toml in `start` or the nearest parent directory
pub fn locate_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ManifestError::not_found(start))
}

/// A parsed project manifest
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    /// Path of the pyproject.toml this was read from
    pub path: PathBuf,
    groups: BTreeMap<String, DependencyGroup>,
}

impl ProjectManifest {
    /// Locate and parse the manifest governing `dir`
    pub fn discover(dir: &Path) -> Result<Self, ManifestError> {
        let path = locate_manifest(dir)?;
        Self::load(&path)
    }

    /// Parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse manifest content; `path` is used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let groups = parse_groups(content, path)?;
        debug!(
            path = %path.display(),
            groups = groups.len(),
            "parsed project manifest"
        );
        Ok(Self {
            path: path.to_path_buf(),
            groups,
        })
    }

    /// Directory containing the manifest
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// All dependency groups, main included
    pub fn groups(&self) -> impl Iterator<Item = &DependencyGroup> {
        self.groups.values()
    }

    /// Every dependency declared in any group
    pub fn declared_dependencies(&self) -> DeclaredDependencySet {
        DeclaredDependencySet::from_groups(self.groups.values())
    }
}
