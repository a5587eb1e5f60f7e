//! lockstep - Selective dependency updater library
//!
//! This library provides the core functionality of the `update` operation:
//! - Validating requested package names against pyproject.toml
//! - Building the forced-update whitelist
//! - Driving an installer through a forced re-resolution

pub mod cli;
pub mod domain;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod update;
