//! Implementation of `mono list` and `mono find`.

use std::path::Path;

use crate::core::discovery::MonoRepo;
use crate::core::filter::PackageFilter;
use crate::core::package::Package;
use crate::ops::{heading_block, NO_PACKAGES};
use crate::util::fs::relative_path;
use crate::util::logger::Logger;

/// Shown by `find` for a package in the current directory.
pub const CURRENT_DIR_MARKER: &str = ". (current)";

/// A count line followed by `name@version` per package.
pub fn list_message(packages: &[&Package], color: bool) -> String {
    heading_block(
        &format!("Found {} packages:", packages.len()),
        packages
            .iter()
            .map(|p| format!("{}@{}", p.name(), p.version())),
        color,
    )
}

/// A count line followed by each package directory relative to `cwd`.
pub fn find_message(packages: &[&Package], cwd: &Path, color: bool) -> String {
    heading_block(
        &format!("Found {} package directories:", packages.len()),
        packages.iter().map(|p| {
            let path = relative_path(cwd, p.dir());
            if path.as_os_str().is_empty() {
                CURRENT_DIR_MARKER.to_string()
            } else {
                path.display().to_string()
            }
        }),
        color,
    )
}

/// Log the selected packages. Returns how many were listed.
pub fn list(repo: &MonoRepo, include: &PackageFilter, logger: &Logger) -> usize {
    let selected = include.apply(repo.packages());
    if selected.is_empty() {
        logger.warn(NO_PACKAGES);
        return 0;
    }

    logger.log(list_message(&selected, logger.use_color()));
    selected.len()
}

/// Log the selected package directories. Returns how many were listed.
pub fn find(repo: &MonoRepo, include: &PackageFilter, cwd: &Path, logger: &Logger) -> usize {
    let selected = include.apply(repo.packages());
    if selected.is_empty() {
        logger.warn(NO_PACKAGES);
        return 0;
    }

    logger.log(find_message(&selected, cwd, logger.use_color()));
    selected.len()
}
