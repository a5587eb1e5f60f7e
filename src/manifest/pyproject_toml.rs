//! pyproject.toml parser for Python projects
//!
//! Handles:
//! - project.dependencies (PEP 621)
//! - project.optional-dependencies (PEP 621, extras of the main group)
//! - dependency-groups (PEP 735)
//! - tool.poetry.dependencies (Poetry)
//! - tool.poetry.dev-dependencies (Poetry, legacy)
//! - tool.poetry.group.<name>.dependencies (Poetry 1.2+)

use crate::domain::{DependencyGroup, MAIN_GROUP};
use crate::error::ManifestError;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use toml::{Table, Value};

// Distribution name at the start of a PEP 508 requirement string
static PEP508_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([a-zA-Z0-9][-a-zA-Z0-9._]*)").unwrap());

/// Group that legacy `tool.poetry.dev-dependencies` belong to
const LEGACY_DEV_GROUP: &str = "dev";

#[derive(Debug, Default, Deserialize)]
struct Pyproject {
    #[serde(default)]
    project: ProjectTable,
    #[serde(default, rename = "dependency-groups")]
    dependency_groups: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(default)]
    poetry: PoetryTable,
}

#[derive(Debug, Default, Deserialize)]
struct PoetryTable {
    #[serde(default)]
    dependencies: Table,
    #[serde(default, rename = "dev-dependencies")]
    dev_dependencies: Table,
    #[serde(default)]
    group: BTreeMap<String, PoetryGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct PoetryGroup {
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    dependencies: Table,
}

/// Parse the dependency groups declared in pyproject.toml content
///
/// The returned map always contains the main group.
pub fn parse_groups(
    content: &str,
    path: &Path,
) -> Result<BTreeMap<String, DependencyGroup>, ManifestError> {
    let pyproject: Pyproject = toml::from_str(content)
        .map_err(|e| ManifestError::toml_parse_error(path, e.message().to_string()))?;

    let mut groups = BTreeMap::new();
    groups.insert(MAIN_GROUP.to_string(), DependencyGroup::main());

    {
        let main = group_entry(&mut groups, MAIN_GROUP);
        for requirement in &pyproject.project.dependencies {
            add_requirement(main, requirement);
        }
        for requirements in pyproject.project.optional_dependencies.values() {
            for requirement in requirements {
                add_requirement(main, requirement);
            }
        }
        for name in pyproject.tool.poetry.dependencies.keys() {
            // The interpreter constraint is not a package
            if name != "python" {
                main.add(name);
            }
        }
    }

    for (group_name, entries) in &pyproject.dependency_groups {
        let group = group_entry(&mut groups, group_name);
        // Include-group tables carry no package of their own
        for requirement in entries.iter().filter_map(Value::as_str) {
            add_requirement(group, requirement);
        }
    }

    if !pyproject.tool.poetry.dev_dependencies.is_empty() {
        let dev = group_entry(&mut groups, LEGACY_DEV_GROUP);
        for name in pyproject.tool.poetry.dev_dependencies.keys() {
            dev.add(name);
        }
    }

    for (group_name, poetry_group) in &pyproject.tool.poetry.group {
        let group = group_entry(&mut groups, group_name);
        group.optional = poetry_group.optional;
        for name in poetry_group.dependencies.keys() {
            group.add(name);
        }
    }

    Ok(groups)
}

fn group_entry<'a>(
    groups: &'a mut BTreeMap<String, DependencyGroup>,
    name: &str,
) -> &'a mut DependencyGroup {
    groups
        .entry(name.to_string())
        .or_insert_with(|| DependencyGroup::new(name))
}

fn add_requirement(group: &mut DependencyGroup, requirement: &str) {
    if let Some(name) = requirement_name(requirement) {
        group.add(name);
    }
}

/// Extract the distribution name from a PEP 508 requirement string
pub fn requirement_name(requirement: &str) -> Option<&str> {
    PEP508_NAME_RE
        .captures(requirement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
