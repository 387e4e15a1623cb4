//! Test utilities for mono unit tests.
//!
//! Provides a temporary mono repo builder and an in-memory registry so
//! operations can be tested without a network or a real package manager.
//!
//! # Example
//!
//! ```rust,ignore
//! use mono::test_support::{MonoRepoFixture, StaticRegistry};
//!
//! let fixture = MonoRepoFixture::new(&["packages/*"]);
//! fixture.add_package("packages/a", json!({ "name": "a", "version": "1.0.0" }));
//! let registry = StaticRegistry::new().with("left-pad", "1.3.0");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::core::discovery::MonoRepo;
use crate::core::manifest::MANIFEST_NAME;
use crate::sources::registry::Registry;
use crate::util::fs::{read_json, write_json};

/// A mono repo in a temporary directory, removed on drop.
pub struct MonoRepoFixture {
    tmp: TempDir,
}

impl MonoRepoFixture {
    /// Create a mono repo whose root declares `workspaces`.
    pub fn new(workspaces: &[&str]) -> Self {
        let tmp = TempDir::new().unwrap();
        write_json(
            &tmp.path().join(MANIFEST_NAME),
            &json!({
                "name": "fixture",
                "version": "1.0.0",
                "license": "MIT",
                "private": true,
                "workspaces": workspaces,
            }),
        )
        .unwrap();

        MonoRepoFixture { tmp }
    }

    /// Get the workspace root.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Write a package manifest under `rel_dir`, returning the package dir.
    pub fn add_package(&self, rel_dir: &str, manifest: Value) -> PathBuf {
        let dir = self.tmp.path().join(rel_dir);
        write_json(&dir.join(MANIFEST_NAME), &manifest).unwrap();
        dir
    }

    /// Write `mono.toml` in the workspace root.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.tmp.path().join("mono.toml"), contents).unwrap();
    }

    /// Read the manifest of the package under `rel_dir`.
    pub fn read_manifest(&self, rel_dir: &str) -> Value {
        read_json(&self.tmp.path().join(rel_dir).join(MANIFEST_NAME)).unwrap()
    }

    /// Load the mono repo.
    pub fn repo(&self) -> MonoRepo {
        MonoRepo::load(self.tmp.path()).unwrap().unwrap()
    }
}

/// Registry answering from a fixed table, recording every lookup.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    versions: HashMap<String, String>,
    lookups: RefCell<Vec<String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        StaticRegistry::default()
    }

    /// Publish `version` as the latest version of `name`.
    pub fn with(mut self, name: &str, version: &str) -> Self {
        self.versions.insert(name.to_string(), version.to_string());
        self
    }

    /// Names looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl Registry for StaticRegistry {
    fn latest_version(&self, name: &str) -> Result<Option<String>> {
        self.lookups.borrow_mut().push(name.to_string());
        Ok(self.versions.get(name).cloned())
    }
}
