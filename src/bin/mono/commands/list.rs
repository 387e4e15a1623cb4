//! `mono list` command

use anyhow::Result;

use crate::cli::ListArgs;
use crate::commands::load_mono_repo;
use crate::GlobalOptions;
use mono::core::filter::PackageFilter;
use mono::ops::mono_list::list;

pub fn execute(args: ListArgs, global_opts: &GlobalOptions) -> Result<()> {
    let Some((_, repo)) = load_mono_repo(global_opts)? else {
        return Ok(());
    };

    let filter = PackageFilter::parse(&args.include.include);
    list(&repo, &filter, &global_opts.logger);

    Ok(())
}
