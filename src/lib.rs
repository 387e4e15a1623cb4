//! mono - workspace tooling for JavaScript mono repos
//!
//! This crate provides the library behind the `mono` binary: locating the
//! workspace root, discovering and filtering member packages, resolving
//! install targets, and running the package manager and scripts across
//! packages one at a time.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities for mono unit tests.
///
/// Only compiled for tests. Provides a temporary mono repo builder and an
/// in-memory registry.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    discovery::MonoRepo, filter::PackageFilter, install_target::InstallTarget,
    manifest::Manifest, package::Package, workspace::WorkspaceRoot,
};

pub use util::context::GlobalContext;
