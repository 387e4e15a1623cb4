//! Workspace root resolution.
//!
//! The workspace root is the nearest directory, walking upward from where
//! mono was invoked, whose `package.json` is `"private": true` and declares
//! at least one workspace glob.

use std::path::{Path, PathBuf};

use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::util::fs;

/// The root of a mono repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    /// Directory containing the root manifest
    root_dir: PathBuf,

    name: String,
    license: String,
    version: String,

    /// Workspace globs in declaration order
    patterns: Vec<String>,
}

impl WorkspaceRoot {
    /// Create a workspace root by hand.
    pub fn new(root_dir: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        WorkspaceRoot {
            root_dir: root_dir.into(),
            name: String::new(),
            license: String::new(),
            version: String::new(),
            patterns,
        }
    }

    /// Read `dir/package.json` and return it if it qualifies as a workspace
    /// root. A missing or unparseable manifest simply does not qualify.
    pub fn read(dir: &Path) -> Option<Self> {
        let manifest_path = dir.join(MANIFEST_NAME);
        if !manifest_path.is_file() {
            return None;
        }

        let descriptor = match Manifest::load(&manifest_path).and_then(|m| m.descriptor()) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::debug!("skipping {}: {:#}", manifest_path.display(), e);
                return None;
            }
        };

        if descriptor.private != Some(true) {
            return None;
        }

        let patterns = descriptor.workspaces?.patterns().to_vec();
        if patterns.is_empty() {
            return None;
        }

        Some(WorkspaceRoot {
            root_dir: dir.to_path_buf(),
            name: descriptor.name.unwrap_or_default(),
            license: descriptor.license.unwrap_or_default(),
            version: descriptor.version.unwrap_or_default(),
            patterns,
        })
    }

    /// Get the workspace root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// All declared workspace patterns, exclusions included.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Patterns that locate member packages.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .filter(|p| !p.starts_with('!'))
    }

    /// Patterns (with the leading `!` stripped) whose matches are dropped.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().filter_map(|p| p.strip_prefix('!'))
    }

    /// Get the root manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(MANIFEST_NAME)
    }
}

/// Walk upward from `start` until a workspace root is found.
///
/// Returns `None` once the filesystem root has been checked without a match.
pub fn find_workspace_root(start: &Path) -> Option<WorkspaceRoot> {
    let mut current = fs::normalize_path(start).unwrap_or_else(|_| start.to_path_buf());

    loop {
        if let Some(root) = WorkspaceRoot::read(&current) {
            tracing::debug!("found workspace root at {}", current.display());
            return Some(root);
        }

        if !current.pop() {
            return None;
        }
    }
}
