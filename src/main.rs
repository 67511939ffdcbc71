mod cli;
mod config;
mod convert;
mod cross_validate_cmd;
mod logging;
mod run_cmd;
mod sweep_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::MorphoConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = MorphoConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Run(args) => run_cmd::run(args, config),
        Command::CrossValidate(args) => cross_validate_cmd::run(args, config),
        Command::Sweep(args) => sweep_cmd::run(args, config),
    }
}
