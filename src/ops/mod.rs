//! High-level operations.
//!
//! This module contains the implementation of mono commands. Each
//! operation takes an already loaded [`MonoRepo`](crate::core::MonoRepo);
//! finding the repo (and warning when there is none) is the caller's job.

pub mod install;
pub mod mono_add;
pub mod mono_list;
pub mod mono_remove;
pub mod mono_run;

use crate::core::package::Package;
use crate::util::logger::{paint, Logger};

pub use install::Installer;
pub use mono_add::{add, AddOptions, AddResult};
pub use mono_list::{find, find_message, list, list_message};
pub use mono_remove::{remove, RemoveOptions, RemoveResult};
pub use mono_run::{run, RunOptions, RunResult, ScriptMode};

/// Warning logged when a filter leaves nothing to act on.
pub const NO_PACKAGES: &str = "No packages found";

const HEADING_COLOR: &str = "\x1b[92m";
const ITEM_COLOR: &str = "\x1b[96m";

/// Build a heading followed by one line per item.
pub(crate) fn heading_block<I>(heading: &str, items: I, color: bool) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut block = paint(heading, HEADING_COLOR, color);
    for item in items {
        block.push('\n');
        block.push_str(&paint(item.as_ref(), ITEM_COLOR, color));
    }
    block
}

/// Log the packages an operation is about to touch.
pub(crate) fn log_targets(logger: &Logger, packages: &[&Package]) {
    logger.log(heading_block(
        "Target packages:",
        packages.iter().map(|p| p.name()),
        logger.use_color(),
    ));
}
