use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use bayesian::ui::cli::args::Cli;
use bayesian::ui::cli::commands::execute;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    execute(cli.command, stdin.lock(), &mut stdout).context("command failed")?;
    stdout.flush()?;

    Ok(())
}
