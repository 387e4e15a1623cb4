//! mono CLI - workspace tooling for JavaScript mono repos

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use mono::util::errors::exit_code_of;
use mono::util::{GlobalContext, Logger};

/// Options shared by every command.
pub struct GlobalOptions {
    /// Logger for user-facing output
    pub logger: Logger,

    /// Package manager override from `--client` / `MONO_CLIENT`
    pub client: Option<String>,
}

impl GlobalOptions {
    /// Context for the current directory, carrying the client override.
    pub fn context(&self) -> Result<GlobalContext> {
        Ok(GlobalContext::new()?.with_client(self.client.clone()))
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(exit_code_of(&e).unwrap_or(1));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("MONO_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("mono=debug")
        } else {
            EnvFilter::new("mono=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global_opts = GlobalOptions {
        logger: Logger::new(cli.color.use_color()),
        client: cli.client,
    };

    match cli.command {
        Commands::Add(args) => commands::add::execute(args, &global_opts),
        Commands::Remove(args) => commands::remove::execute(args, &global_opts),
        Commands::Run(args) => commands::run::execute(args, &global_opts),
        Commands::List(args) => commands::list::execute(args, &global_opts),
        Commands::Find(args) => commands::find::execute(args, &global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
