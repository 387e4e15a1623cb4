//! `mono add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::commands::load_mono_repo;
use crate::GlobalOptions;
use mono::core::filter::PackageFilter;
use mono::core::manifest::DependencyKind;
use mono::ops::mono_add::{add, AddOptions, AddResult};
use mono::ops::Installer;
use mono::sources::registry_from_config;

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let Some((ctx, repo)) = load_mono_repo(global_opts)? else {
        return Ok(());
    };

    let config = ctx.config_for(repo.root().root_dir())?;
    let registry = registry_from_config(&config)?;
    let installer = Installer::new(config.client());

    let opts = AddOptions {
        targets: args.packages,
        include: PackageFilter::parse(&args.include.include),
        kind: DependencyKind::from_dev_flag(args.dev),
    };

    if let AddResult::Added { targets, .. } =
        add(&repo, &opts, registry.as_ref(), &installer, &global_opts.logger)?
    {
        for target in &targets {
            tracing::info!("added {}", target);
        }
    }

    Ok(())
}
