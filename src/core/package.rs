//! Package - one member of a workspace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::util::errors::MonoError;

/// A workspace member, identified by its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Absolute directory containing the manifest
    dir: PathBuf,

    /// Declared package name
    name: String,

    /// Declared version (empty when the manifest has none)
    version: String,

    /// Declared license (empty when the manifest has none)
    license: String,

    /// Script name -> shell command
    scripts: BTreeMap<String, String>,
}

impl Package {
    /// Create a package by hand.
    pub fn new(name: impl Into<String>, version: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Package {
            dir: dir.into(),
            name: name.into(),
            version: version.into(),
            license: String::new(),
            scripts: BTreeMap::new(),
        }
    }

    /// Add a script.
    pub fn with_script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.insert(name.into(), command.into());
        self
    }

    /// Set the license.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    /// Build a package from a loaded manifest.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let descriptor = manifest.descriptor()?;

        let name = descriptor.name.ok_or_else(|| MonoError::InvalidManifest {
            path: manifest.path().to_path_buf(),
            reason: "missing `name`".to_string(),
        })?;

        Ok(Package {
            dir: manifest.dir().to_path_buf(),
            name,
            version: descriptor.version.unwrap_or_default(),
            license: descriptor.license.unwrap_or_default(),
            scripts: descriptor.scripts,
        })
    }

    /// Load a package from a manifest file.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        Self::from_manifest(&Manifest::load(manifest_path)?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn scripts(&self) -> &BTreeMap<String, String> {
        &self.scripts
    }

    /// Get the command for a script, if declared.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// Check whether the package declares a script.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Path of the package's manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::fs::write_json;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_package() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        write_json(
            &path,
            &json!({
                "name": "one",
                "version": "1.0.0",
                "license": "MIT",
                "scripts": { "test": "touch test.txt" }
            }),
        )
        .unwrap();

        let pkg = Package::load(&path).unwrap();

        assert_eq!(pkg.name(), "one");
        assert_eq!(pkg.version(), "1.0.0");
        assert_eq!(pkg.license(), "MIT");
        assert_eq!(pkg.dir(), tmp.path());
        assert_eq!(pkg.script("test"), Some("touch test.txt"));
        assert!(!pkg.has_script("build"));
        assert_eq!(pkg.manifest_path(), path);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        write_json(&path, &json!({ "name": "bare" })).unwrap();

        let pkg = Package::load(&path).unwrap();

        assert_eq!(pkg.version(), "");
        assert!(pkg.scripts().is_empty());
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        write_json(&path, &json!({ "version": "1.0.0" })).unwrap();

        let err = Package::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing `name`"));
    }
}
