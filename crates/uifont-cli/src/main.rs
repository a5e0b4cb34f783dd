//! uifont CLI - query the font resolution facade from the command line

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Resolve(args) => commands::resolve::run(&args),
    }
}
