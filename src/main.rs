use std::process::ExitCode;

use clap::Parser;
use gwplot::{driver, logging, session::Session, Cli};

fn main() -> anyhow::Result<ExitCode> {
    // The rendering backend is fixed once, before any plotting happens.
    let session = Session::from_env();
    let cli = Cli::parse();
    logging::init(cli.command.verbosity());
    let code = driver::run(cli.command, &session)?;
    Ok(ExitCode::from(code))
}
