//! Timehouse CLI

use crate::cli::Cli;

mod cli;

pub fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = cli.init_logging() {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }
    }

    if let Err(error) = cli.run() {
        tracing::error!("{error}");

        std::process::exit(1);
    }
}
