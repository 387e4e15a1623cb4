//! `mono remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::commands::load_mono_repo;
use crate::GlobalOptions;
use mono::core::filter::PackageFilter;
use mono::ops::mono_remove::{remove, RemoveOptions, RemoveResult};
use mono::ops::Installer;

pub fn execute(args: RemoveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let Some((ctx, repo)) = load_mono_repo(global_opts)? else {
        return Ok(());
    };

    let config = ctx.config_for(repo.root().root_dir())?;
    let installer = Installer::new(config.client());

    let opts = RemoveOptions {
        names: args.packages,
        include: PackageFilter::parse(&args.include.include),
    };

    if let RemoveResult::Removed { updated } = remove(&repo, &opts, &installer, &global_opts.logger)? {
        tracing::info!("updated {} manifests", updated);
    }

    Ok(())
}
