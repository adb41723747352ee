//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use localbites_cli::CliError;

fn main() -> eyre::Result<()> {
    pretty_env_logger::init();
    match localbites_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => Ok(outcome?),
    }
}
