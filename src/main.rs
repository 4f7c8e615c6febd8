mod cli;
mod config;
mod forecast_cmd;
mod logging;
mod series_io;
mod synth;
mod synth_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Forecast(args) => forecast_cmd::run(args),
        Command::Synth(args) => synth_cmd::run(args),
    }
}
