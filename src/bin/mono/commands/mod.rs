//! Command implementations

pub mod add;
pub mod completions;
pub mod find;
pub mod list;
pub mod remove;
pub mod run;

use anyhow::Result;

use crate::GlobalOptions;
use mono::core::MonoRepo;
use mono::util::GlobalContext;

/// Warning logged when the working directory is not inside a mono repo.
pub const NO_MONO_REPO: &str = "Unable to locate your mono repo";

/// Load the mono repo around the working directory, warning when there is
/// none.
pub fn load_mono_repo(global_opts: &GlobalOptions) -> Result<Option<(GlobalContext, MonoRepo)>> {
    let ctx = global_opts.context()?;

    match ctx.load_mono_repo()? {
        Some(repo) => Ok(Some((ctx, repo))),
        None => {
            global_opts.logger.warn(NO_MONO_REPO);
            Ok(None)
        }
    }
}
