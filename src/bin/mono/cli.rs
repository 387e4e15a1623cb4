//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use mono::core::filter::MATCH_ALL;
use mono::util::ColorChoice;

/// mono - manage the packages of a JavaScript mono repo
#[derive(Parser)]
#[command(name = "mono")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to use colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Package manager to install and run scripts with
    #[arg(long, global = true, env = "MONO_CLIENT")]
    pub client: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install dependencies from the registry or your local mono repo
    Add(AddArgs),

    /// Remove dependencies from packages in your mono repo
    Remove(RemoveArgs),

    /// Run a package script in every package that has it
    Run(RunArgs),

    /// List packages
    List(ListArgs),

    /// Find package directories relative to the current directory
    Find(FindArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Selects packages by name: `name`, `prefix*`, `*`, comma separated.
#[derive(Args, Debug, Clone)]
pub struct IncludeArgs {
    /// Packages to include (comma separated names or `prefix*` patterns)
    #[arg(short, long, default_value = MATCH_ALL)]
    pub include: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Packages to install: name, name@version or @scope/name@version
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Save to devDependencies
    #[arg(short = 'D', long)]
    pub dev: bool,

    #[command(flatten)]
    pub include: IncludeArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Dependencies to remove
    #[arg(required = true)]
    pub packages: Vec<String>,

    #[command(flatten)]
    pub include: IncludeArgs,
}

#[derive(Args)]
pub struct RunArgs {
    /// Script to run
    pub script: String,

    /// Arguments forwarded to the script (use `--` before ones starting with `-`)
    pub args: Vec<String>,

    #[command(flatten)]
    pub include: IncludeArgs,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub include: IncludeArgs,
}

#[derive(Args)]
pub struct FindArgs {
    #[command(flatten)]
    pub include: IncludeArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
