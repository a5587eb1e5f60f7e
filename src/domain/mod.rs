//! Core domain models for lockstep
//!
//! This module contains the fundamental types used throughout the application:
//! - Canonical package names
//! - Declared dependency groups and the project's declared dependency set
//! - Update requests and outcomes
//! - The forced-update whitelist

mod dependency;
mod package_name;
mod request;
mod whitelist;

pub use dependency::{DeclaredDependencySet, DependencyGroup, MAIN_GROUP};
pub use package_name::{canonicalize, PackageName};
pub use request::{UpdateOutcome, UpdateRequest};
pub use whitelist::{Whitelist, WILDCARD};
