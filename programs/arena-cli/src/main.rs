//! `arena`: run Iterated Prisoner's Dilemma matches and tournaments from the shell

mod cli;
mod commands;
mod logging;

use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Command::Strategies(args) => commands::strategies::run(args),
        Command::Simulate(args) => commands::simulate::run(args),
        Command::Tournament(args) => commands::tournament::run(args),
    }
}
