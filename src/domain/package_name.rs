//! Canonical package identity
//!
//! Package names compare case- and separator-insensitively: every run of
//! `-`, `_` or `.` collapses to a single `-` and the result is lowercased.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SEPARATOR_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// A package name in canonical form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Canonicalizes a raw package name
    pub fn new(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    /// Returns the canonical string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns the canonical form of a package name
pub fn canonicalize(raw: &str) -> String {
    SEPARATOR_RUN_RE
        .replace_all(raw, "-")
        .to_ascii_lowercase()
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
