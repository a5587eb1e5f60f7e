//! Forced-update scope handed to the installer

use super::package_name::PackageName;

/// Version marker meaning "latest allowed by the existing constraints"
pub const WILDCARD: &str = "*";

/// Ordered mapping of requested package tokens to the wildcard marker
///
/// Keys keep the spelling the user typed; a token whose canonical form was
/// already inserted is dropped, so the first spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    entries: Vec<String>,
}

impl Whitelist {
    /// Creates an empty whitelist (meaning "all declared dependencies")
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a whitelist from raw requested tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::new();
        for token in tokens {
            whitelist.insert(token.as_ref());
        }
        whitelist
    }

    /// Inserts a token; returns false if its canonical form is already present
    pub fn insert(&mut self, token: &str) -> bool {
        let canonical = PackageName::new(token);
        if self.entries.iter().any(|e| PackageName::new(e) == canonical) {
            return false;
        }
        self.entries.push(token.to_string());
        true
    }

    /// Iterates `(package, version marker)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|e| (e.as_str(), WILDCARD))
    }

    /// Returns the package tokens in insertion order
    pub fn packages(&self) -> &[String] {
        &self.entries
    }

    /// Returns the version marker for a package, matched canonically
    pub fn get(&self, package: &str) -> Option<&'static str> {
        let canonical = PackageName::new(package);
        self.entries
            .iter()
            .any(|e| PackageName::new(e) == canonical)
            .then_some(WILDCARD)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
