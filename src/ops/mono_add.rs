//! Implementation of `mono add`.
//!
//! Every install target is resolved up front, written into each selected
//! package's manifest, and then a single install at the workspace root
//! fetches registry packages and links local ones.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::discovery::MonoRepo;
use crate::core::filter::PackageFilter;
use crate::core::install_target::{parse_name, InstallTarget};
use crate::core::manifest::{DependencyKind, Manifest};
use crate::ops::install::Installer;
use crate::ops::{log_targets, NO_PACKAGES};
use crate::sources::registry::Registry;
use crate::util::logger::Logger;

/// Options for adding dependencies.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Install targets: `name`, `name@version`, `@scope/name@version`
    pub targets: Vec<String>,

    /// Packages receiving the dependencies
    pub include: PackageFilter,

    /// Dependency table to write to
    pub kind: DependencyKind,
}

/// Result of an add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// The filter selected no packages; nothing was changed.
    NoPackages,
    /// Dependencies were written and installed.
    Added {
        targets: Vec<InstallTarget>,
        /// Manifests that were rewritten
        updated: Vec<PathBuf>,
    },
}

/// Add dependencies to the selected packages of `repo`.
pub fn add(
    repo: &MonoRepo,
    opts: &AddOptions,
    registry: &dyn Registry,
    installer: &Installer,
    logger: &Logger,
) -> Result<AddResult> {
    let selected = opts.include.apply(repo.packages());
    if selected.is_empty() {
        logger.warn(NO_PACKAGES);
        return Ok(AddResult::NoPackages);
    }

    let targets = resolve_targets(repo, &opts.targets, registry)?;

    log_targets(logger, &selected);

    let mut updated = Vec::new();
    for pkg in &selected {
        let deps: Vec<&InstallTarget> = targets.iter().filter(|t| t.name != pkg.name()).collect();
        if deps.is_empty() {
            continue;
        }

        let mut manifest = Manifest::load(&pkg.manifest_path())?;
        for target in deps {
            manifest.set_dependency(opts.kind, &target.name, &target.requirement())?;
        }
        manifest.save()?;

        tracing::debug!("updated {}", manifest.path().display());
        updated.push(manifest.path().to_path_buf());
    }

    installer.install(repo.root().root_dir())?;

    Ok(AddResult::Added { targets, updated })
}

/// Resolve every target, registry packages first and local packages after.
///
/// Resolution happens before any manifest is touched, so an unknown package
/// leaves the workspace unchanged.
fn resolve_targets(
    repo: &MonoRepo,
    inputs: &[String],
    registry: &dyn Registry,
) -> Result<Vec<InstallTarget>> {
    let (local, external): (Vec<&String>, Vec<&String>) = inputs
        .iter()
        .partition(|input| repo.find(parse_name(input)).is_some());

    external
        .into_iter()
        .chain(local)
        .map(|input| InstallTarget::resolve(input, repo.packages(), registry))
        .collect()
}
