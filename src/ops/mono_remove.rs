//! Implementation of `mono remove`.

use anyhow::Result;

use crate::core::discovery::MonoRepo;
use crate::core::filter::PackageFilter;
use crate::core::install_target::parse_name;
use crate::core::manifest::Manifest;
use crate::ops::install::Installer;
use crate::ops::{log_targets, NO_PACKAGES};
use crate::util::logger::Logger;

/// Options for removing dependencies.
#[derive(Debug, Clone)]
pub struct RemoveOptions {
    /// Dependency names; a trailing `@version` is ignored
    pub names: Vec<String>,

    /// Packages losing the dependencies
    pub include: PackageFilter,
}

/// Result of a remove operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult {
    /// The filter selected no packages; nothing was changed.
    NoPackages,
    /// Dependencies were removed (where present) and the workspace reinstalled.
    Removed {
        /// Number of manifests that were rewritten
        updated: usize,
    },
}

/// Remove dependencies from both dependency tables of the selected packages.
pub fn remove(
    repo: &MonoRepo,
    opts: &RemoveOptions,
    installer: &Installer,
    logger: &Logger,
) -> Result<RemoveResult> {
    let selected = opts.include.apply(repo.packages());
    if selected.is_empty() {
        logger.warn(NO_PACKAGES);
        return Ok(RemoveResult::NoPackages);
    }

    log_targets(logger, &selected);

    let mut updated = 0;
    for pkg in &selected {
        let mut manifest = Manifest::load(&pkg.manifest_path())?;

        let mut changed = false;
        for name in &opts.names {
            changed |= manifest.remove_dependency(parse_name(name));
        }

        if changed {
            manifest.save()?;
            updated += 1;
        }
    }

    installer.install(repo.root().root_dir())?;

    Ok(RemoveResult::Removed { updated })
}
