//! `mono run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::load_mono_repo;
use crate::GlobalOptions;
use mono::core::filter::PackageFilter;
use mono::ops::mono_run::{run, RunOptions, ScriptMode};

pub fn execute(args: RunArgs, global_opts: &GlobalOptions) -> Result<()> {
    let Some((ctx, repo)) = load_mono_repo(global_opts)? else {
        return Ok(());
    };

    let config = ctx.config_for(repo.root().root_dir())?;
    let mode = if config.run_in_shell() {
        ScriptMode::Shell
    } else {
        ScriptMode::Client(config.client().to_string())
    };

    let opts = RunOptions {
        script: args.script,
        args: args.args,
        include: PackageFilter::parse(&args.include.include),
        mode,
    };

    run(&repo, &opts, &global_opts.logger)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Helper to parse RunArgs from command-line strings.
    fn parse_run_args(args: &[&str]) -> RunArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            run: RunArgs,
        }
        TestCli::parse_from(args).run
    }

    #[test]
    fn test_run_args_defaults() {
        let args = parse_run_args(&["test", "build"]);

        assert_eq!(args.script, "build");
        assert!(args.args.is_empty());
        assert_eq!(args.include.include, "*");
    }

    #[test]
    fn test_run_forwards_args_after_separator() {
        let args = parse_run_args(&["test", "test", "-i", "web", "--", "--watch", "-t", "name"]);

        assert_eq!(args.script, "test");
        assert_eq!(args.include.include, "web");
        assert_eq!(args.args, vec!["--watch", "-t", "name"]);
    }

    #[test]
    fn test_run_forwards_positional_args() {
        let args = parse_run_args(&["test", "touch", "1.txt", "2.txt"]);

        assert_eq!(args.script, "touch");
        assert_eq!(args.args, vec!["1.txt", "2.txt"]);
        assert_eq!(args.include.include, "*");
    }

    #[test]
    fn test_run_include_before_script() {
        let args = parse_run_args(&["test", "--include", "a,b", "lint"]);

        assert_eq!(args.script, "lint");
        assert_eq!(args.include.include, "a,b");
    }
}
