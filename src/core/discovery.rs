//! Package discovery.
//!
//! Expands the root's workspace globs into member packages. Matches are
//! reported in pattern order, then in glob order within a pattern, and any
//! manifest that sits inside a `node_modules` directory is ignored so a
//! dependency's own workspace never shows up as a sibling.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;

use crate::core::manifest::{MANIFEST_NAME, NESTED_DEPENDENCY_DIR};
use crate::core::package::Package;
use crate::core::workspace::{find_workspace_root, WorkspaceRoot};
use crate::util::errors::MonoError;

/// A workspace root together with its member packages.
#[derive(Debug, Clone)]
pub struct MonoRepo {
    root: WorkspaceRoot,
    packages: Vec<Package>,
}

impl MonoRepo {
    /// Locate the mono repo containing `start` and discover its packages.
    ///
    /// Returns `None` when `start` is not inside a mono repo.
    pub fn load(start: &Path) -> Result<Option<Self>> {
        let Some(root) = find_workspace_root(start) else {
            return Ok(None);
        };
        let packages = discover_in(&root)?;
        Ok(Some(MonoRepo { root, packages }))
    }

    /// Assemble a mono repo from parts.
    pub fn new(root: WorkspaceRoot, packages: Vec<Package>) -> Self {
        MonoRepo { root, packages }
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Find a package by exact name.
    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }
}

/// Discover every package of the mono repo containing `start`.
///
/// Not being inside a mono repo yields an empty list, not an error.
pub fn discover_packages(start: &Path) -> Result<Vec<Package>> {
    match find_workspace_root(start) {
        Some(root) => discover_in(&root),
        None => Ok(Vec::new()),
    }
}

/// Discover the packages of a known workspace root.
pub fn discover_in(root: &WorkspaceRoot) -> Result<Vec<Package>> {
    let paths = manifest_paths(root)?;

    // Reads are independent; collecting keeps path order.
    let packages = paths
        .par_iter()
        .map(|path| Package::load(path))
        .collect::<Result<Vec<_>>>()?;

    check_unique_names(&packages)?;

    tracing::debug!(
        "discovered {} packages under {}",
        packages.len(),
        root.root_dir().display()
    );

    Ok(packages)
}

/// Expand the root's patterns into manifest paths.
fn manifest_paths(root: &WorkspaceRoot) -> Result<Vec<PathBuf>> {
    let root_dir = root.root_dir();
    let escaped_root = Pattern::escape(&root_dir.to_string_lossy());

    let exclusions = root
        .exclude_patterns()
        .map(|p| {
            Pattern::new(p.trim_end_matches('/'))
                .with_context(|| format!("invalid workspace pattern: !{}", p))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for pattern in root.include_patterns() {
        let full = format!(
            "{}/{}/{}",
            escaped_root,
            pattern.trim_end_matches('/'),
            MANIFEST_NAME
        );

        let entries =
            glob::glob(&full).with_context(|| format!("invalid workspace pattern: {}", pattern))?;

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                    continue;
                }
            };

            let Ok(relative) = path.strip_prefix(root_dir) else {
                continue;
            };
            if in_nested_dependency_dir(relative) {
                continue;
            }

            let package_dir = relative.parent().unwrap_or(Path::new(""));
            if exclusions.iter().any(|p| p.matches_path(package_dir)) {
                tracing::debug!("excluding {}", package_dir.display());
                continue;
            }

            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }

    Ok(paths)
}

/// Check whether any component of `path` is a dependency directory.
fn in_nested_dependency_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == NESTED_DEPENDENCY_DIR))
}

fn check_unique_names(packages: &[Package]) -> Result<()> {
    let mut by_name: HashMap<&str, &Path> = HashMap::new();
    for pkg in packages {
        if let Some(first) = by_name.insert(pkg.name(), pkg.dir()) {
            return Err(MonoError::DuplicatePackageName {
                name: pkg.name().to_string(),
                first: first.to_path_buf(),
                second: pkg.dir().to_path_buf(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MonoRepoFixture;
    use serde_json::json;

    #[test]
    fn test_discovers_all_packages() {
        let fixture = MonoRepoFixture::new(&["packages/*"]);
        let one = fixture.add_package("packages/one", json!({
            "name": "@packages/one",
            "version": "1.0.0",
            "license": "MIT",
            "scripts": { "test": "touch test.txt" }
        }));
        let two = fixture.add_package("packages/two", json!({
            "name": "@packages/two",
            "version": "1.0.0",
            "license": "MIT",
            "scripts": { "test": "touch test.txt" }
        }));

        let packages = discover_packages(fixture.root()).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name(), "@packages/one");
        assert_eq!(packages[0].dir(), one);
        assert_eq!(packages[1].name(), "@packages/two");
        assert_eq!(packages[1].dir(), two);
        assert_eq!(packages[1].script("test"), Some("touch test.txt"));
    }

    #[test]
    fn test_same_result_from_package_dir() {
        let fixture = MonoRepoFixture::new(&["packages/*"]);
        let one = fixture.add_package("packages/one", json!({ "name": "one", "version": "1.0.0" }));
        fixture.add_package("packages/two", json!({ "name": "two", "version": "1.0.0" }));

        let from_root = discover_packages(fixture.root()).unwrap();
        let from_pkg = discover_packages(&one).unwrap();

        assert_eq!(from_root, from_pkg);
    }

    #[test]
    fn test_pattern_order_is_preserved() {
        let fixture = MonoRepoFixture::new(&["tools/*", "apps/*"]);
        fixture.add_package("apps/web", json!({ "name": "web" }));
        fixture.add_package("tools/lint", json!({ "name": "lint" }));

        let packages = discover_packages(fixture.root()).unwrap();
        let names: Vec<&str> = packages.iter().map(Package::name).collect();

        assert_eq!(names, vec!["lint", "web"]);
    }

    #[test]
    fn test_excludes_nested_dependency_dirs() {
        let fixture = MonoRepoFixture::new(&["packages/**"]);
        fixture.add_package("packages/a", json!({ "name": "a" }));
        fixture.add_package("packages/a/node_modules/dep", json!({ "name": "dep" }));
        fixture.add_package(
            "packages/node_modules/other/packages/x",
            json!({ "name": "x" }),
        );

        let packages = discover_packages(fixture.root()).unwrap();
        let names: Vec<&str> = packages.iter().map(Package::name).collect();

        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_negated_patterns_exclude() {
        let fixture = MonoRepoFixture::new(&["packages/*", "!packages/legacy"]);
        fixture.add_package("packages/current", json!({ "name": "current" }));
        fixture.add_package("packages/legacy", json!({ "name": "legacy" }));

        let packages = discover_packages(fixture.root()).unwrap();

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name(), "current");
    }

    #[test]
    fn test_overlapping_patterns_do_not_duplicate() {
        let fixture = MonoRepoFixture::new(&["packages/*", "packages/a"]);
        fixture.add_package("packages/a", json!({ "name": "a" }));

        assert_eq!(discover_packages(fixture.root()).unwrap().len(), 1);
    }

    #[test]
    fn test_pattern_without_matches_is_not_an_error() {
        let fixture = MonoRepoFixture::new(&["packages/*", "empty/*"]);
        fixture.add_package("packages/a", json!({ "name": "a" }));

        assert_eq!(discover_packages(fixture.root()).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_package_manifest_is_fatal() {
        let fixture = MonoRepoFixture::new(&["packages/*"]);
        fixture.add_package("packages/a", json!({ "name": "a" }));
        let broken = fixture.root().join("packages/b");
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(broken.join(MANIFEST_NAME), "{ nope").unwrap();

        assert!(discover_packages(fixture.root()).is_err());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let fixture = MonoRepoFixture::new(&["packages/*"]);
        fixture.add_package("packages/a", json!({ "name": "same" }));
        fixture.add_package("packages/b", json!({ "name": "same" }));

        let err = discover_packages(fixture.root()).unwrap_err();
        assert!(err.to_string().contains("duplicate package name `same`"));
    }

    #[test]
    fn test_outside_mono_repo_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();

        assert!(discover_packages(tmp.path()).unwrap().is_empty());
        assert!(MonoRepo::load(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn test_mono_repo_find() {
        let fixture = MonoRepoFixture::new(&["packages/*"]);
        fixture.add_package("packages/a", json!({ "name": "a", "version": "2.0.0" }));

        let repo = fixture.repo();

        assert_eq!(repo.root().root_dir(), fixture.root());
        assert_eq!(repo.find("a").unwrap().version(), "2.0.0");
        assert!(repo.find("b").is_none());
    }
}
