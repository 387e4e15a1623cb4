//! `mono find` command

use anyhow::Result;

use crate::cli::FindArgs;
use crate::commands::load_mono_repo;
use crate::GlobalOptions;
use mono::core::filter::PackageFilter;
use mono::ops::mono_list::find;

pub fn execute(args: FindArgs, global_opts: &GlobalOptions) -> Result<()> {
    let Some((ctx, repo)) = load_mono_repo(global_opts)? else {
        return Ok(());
    };

    let filter = PackageFilter::parse(&args.include.include);
    find(&repo, &filter, ctx.cwd(), &global_opts.logger);

    Ok(())
}
