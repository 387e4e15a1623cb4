//! Implementation of `mono run`.
//!
//! The script runs in one package at a time, in filter order. Output is
//! streamed through a logger prefixed with the package name, and the first
//! failure stops the sequence.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::discovery::MonoRepo;
use crate::core::filter::PackageFilter;
use crate::core::manifest::NESTED_DEPENDENCY_DIR;
use crate::core::package::Package;
use crate::ops::{log_targets, NO_PACKAGES};
use crate::util::colors::ColorCycle;
use crate::util::errors::exit_code_of;
use crate::util::logger::{paint, Logger};
use crate::util::process::{find_executable, prepend_path, ProcessBuilder};

/// How a package script is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptMode {
    /// `<client> run <script> [args..]`
    Client(String),
    /// The script's command line through the platform shell, with the
    /// workspace's `node_modules/.bin` directories on `PATH`.
    Shell,
}

/// Options for running a script.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Script name, looked up in each package's `scripts`
    pub script: String,

    /// Arguments appended verbatim to the script
    pub args: Vec<String>,

    /// Packages to consider
    pub include: PackageFilter,

    pub mode: ScriptMode,
}

/// Result of a run operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// No selected package declares the script.
    NoPackages,
    /// The script succeeded in every listed package, in this order.
    Ran(Vec<String>),
}

/// Run a script across the selected packages that declare it.
pub fn run(repo: &MonoRepo, opts: &RunOptions, logger: &Logger) -> Result<RunResult> {
    let selected: Vec<&Package> = opts
        .include
        .apply(repo.packages())
        .into_iter()
        .filter(|p| p.has_script(&opts.script))
        .collect();

    if selected.is_empty() {
        logger.warn(NO_PACKAGES);
        return Ok(RunResult::NoPackages);
    }

    log_targets(logger, &selected);

    let color = logger.use_color();
    let script = paint(&opts.script, "\x1b[92m", color);
    let mut colors = ColorCycle::new();
    let mut ran = Vec::with_capacity(selected.len());

    for pkg in selected {
        let prefix = colors.apply(&format!("[{}]", pkg.name()), color);
        let pkg_logger = Logger::with_prefix(prefix, color);
        let name = paint(pkg.name(), "\x1b[96m", color);

        let process = script_process(repo.root().root_dir(), pkg, opts)?;

        if let Err(err) = process.exec_streamed(&pkg_logger) {
            match exit_code_of(&err) {
                Some(code) => logger.error(format!(
                    "Script {} in package {} exited with code {}",
                    script, name, code
                )),
                None => logger.error(format!("Script {} in package {} failed", script, name)),
            }
            return Err(err);
        }

        logger.log(format!("Script {} in package {} is done", script, name));
        ran.push(pkg.name().to_string());
    }

    logger.log("All done");

    Ok(RunResult::Ran(ran))
}

/// Build the process that runs `opts.script` for `pkg`.
fn script_process(root_dir: &Path, pkg: &Package, opts: &RunOptions) -> Result<ProcessBuilder> {
    let process = match &opts.mode {
        ScriptMode::Client(client) => {
            let program = find_executable(client).unwrap_or_else(|| PathBuf::from(client));
            ProcessBuilder::new(program).args(client_args(client, &opts.script, &opts.args))
        }
        ScriptMode::Shell => {
            let command = pkg.script(&opts.script).unwrap_or_default();
            let bins = [
                pkg.dir().join(NESTED_DEPENDENCY_DIR).join(".bin"),
                root_dir.join(NESTED_DEPENDENCY_DIR).join(".bin"),
            ];
            ProcessBuilder::shell(shell_command(command, &opts.args))
                .env("PATH", prepend_path(&bins)?)
        }
    };

    Ok(process.cwd(pkg.dir()))
}

/// Arguments for `<client> run`. npm needs `--` before forwarded arguments
/// or it keeps them for itself.
fn client_args(client: &str, script: &str, args: &[String]) -> Vec<String> {
    let mut out = vec!["run".to_string(), script.to_string()];
    if !args.is_empty() && is_npm(client) {
        out.push("--".to_string());
    }
    out.extend(args.iter().cloned());
    out
}

fn is_npm(client: &str) -> bool {
    Path::new(client)
        .file_stem()
        .is_some_and(|stem| stem.eq_ignore_ascii_case("npm"))
}

/// The script's command line with forwarded arguments appended.
fn shell_command(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}
