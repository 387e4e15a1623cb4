//! `package.json` manifest I/O.
//!
//! A [`Manifest`] is the whole JSON document, kept as an ordered map so that
//! keys mono does not understand survive a read-modify-write untouched and in
//! their original order. [`PackageDescriptor`] is the typed view over the
//! keys mono does understand.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::util::errors::MonoError;
use crate::util::fs;

/// File name of a package manifest.
pub const MANIFEST_NAME: &str = "package.json";

/// Directory holding installed dependencies. Manifests inside it belong to
/// dependencies, never to the workspace.
pub const NESTED_DEPENDENCY_DIR: &str = "node_modules";

/// Which dependency table an entry is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Normal,
    Development,
}

impl DependencyKind {
    /// Select the kind from a `--dev` flag.
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            DependencyKind::Development
        } else {
            DependencyKind::Normal
        }
    }

    /// The manifest key for this table.
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Normal => "dependencies",
            DependencyKind::Development => "devDependencies",
        }
    }

    /// Every dependency table mono edits.
    pub fn all() -> [DependencyKind; 2] {
        [DependencyKind::Normal, DependencyKind::Development]
    }
}

/// The `workspaces` field: either a list of globs or yarn's object form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    /// `"workspaces": ["packages/*"]`
    Patterns(Vec<String>),

    /// `"workspaces": { "packages": ["packages/*"], "nohoist": [...] }`
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
        #[serde(default)]
        nohoist: Vec<String>,
    },
}

impl Workspaces {
    /// The glob patterns locating member packages.
    pub fn patterns(&self) -> &[String] {
        match self {
            Workspaces::Patterns(patterns) => patterns,
            Workspaces::Detailed { packages, .. } => packages,
        }
    }
}

/// Typed view of the manifest keys mono reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub private: Option<bool>,
    pub workspaces: Option<Workspaces>,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

/// A manifest document bound to its file.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_json(path)? {
            Value::Object(doc) => Ok(Manifest {
                path: path.to_path_buf(),
                doc,
            }),
            _ => Err(MonoError::InvalidManifest {
                path: path.to_path_buf(),
                reason: "expected a JSON object".to_string(),
            }
            .into()),
        }
    }

    /// Create an in-memory manifest (not yet written).
    pub fn from_document(path: impl Into<PathBuf>, doc: Map<String, Value>) -> Self {
        Manifest {
            path: path.into(),
            doc,
        }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// The raw document.
    pub fn document(&self) -> &Map<String, Value> {
        &self.doc
    }

    /// Parse the typed view of the recognized keys.
    pub fn descriptor(&self) -> Result<PackageDescriptor> {
        serde_json::from_value(Value::Object(self.doc.clone())).map_err(|e| {
            MonoError::InvalidManifest {
                path: self.path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Set `name` to `spec` in the given dependency table, creating the table
    /// when it is missing.
    pub fn set_dependency(&mut self, kind: DependencyKind, name: &str, spec: &str) -> Result<()> {
        let table = self
            .doc
            .entry(kind.key())
            .or_insert_with(|| Value::Object(Map::new()));

        match table {
            Value::Object(deps) => {
                deps.insert(name.to_string(), Value::String(spec.to_string()));
                Ok(())
            }
            _ => Err(MonoError::InvalidManifest {
                path: self.path.clone(),
                reason: format!("`{}` is not an object", kind.key()),
            }
            .into()),
        }
    }

    /// Remove `name` from every dependency table. Returns whether anything
    /// was removed.
    pub fn remove_dependency(&mut self, name: &str) -> bool {
        let mut removed = false;
        for kind in DependencyKind::all() {
            if let Some(Value::Object(deps)) = self.doc.get_mut(kind.key()) {
                removed |= deps.shift_remove(name).is_some();
            }
        }
        removed
    }

    /// Look up a dependency spec in the given table.
    pub fn dependency(&self, kind: DependencyKind, name: &str) -> Option<&str> {
        self.doc.get(kind.key())?.get(name)?.as_str()
    }

    /// Write the document back to its file.
    pub fn save(&self) -> Result<()> {
        fs::write_json(&self.path, &Value::Object(self.doc.clone()))
    }
}
