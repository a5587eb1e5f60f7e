//! Update selection logic
//!
//! This module provides:
//! - Dependency group activation from the group selection options
//! - Request validation and whitelist construction
//! - Dispatch of the update directive to an installer

mod groups;
mod selector;

pub use groups::GroupSelection;
pub use selector::{find_specifiers, find_unknown, run_update, UpdateSelector};
