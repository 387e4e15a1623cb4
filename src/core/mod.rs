//! Core data structures for mono.
//!
//! This module contains the workspace model and the engine built on it:
//! - Manifests and packages
//! - Workspace root resolution and package discovery
//! - Package filtering
//! - Install target parsing and version resolution

pub mod discovery;
pub mod filter;
pub mod install_target;
pub mod manifest;
pub mod package;
pub mod workspace;

pub use discovery::{discover_packages, MonoRepo};
pub use filter::{filter_packages, PackageFilter};
pub use install_target::{parse_name, parse_version, resolve_version, InstallTarget, VersionSpec};
pub use manifest::{DependencyKind, Manifest, MANIFEST_NAME};
pub use package::Package;
pub use workspace::{find_workspace_root, WorkspaceRoot};
