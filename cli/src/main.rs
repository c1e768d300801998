mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, check, validate};
use netcheck_common::config::Settings;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    match commands.command {
        Commands::Check { file, timeout, jobs, strict } => {
            let settings = Settings {
                quiet: commands.quiet,
                jobs: usize::from(jobs),
                strict,
            };
            print::header("checking endpoints", settings.quiet);
            check::check(&file, timeout, &settings).await
        }
        Commands::Validate { file } => {
            let settings = Settings {
                quiet: commands.quiet,
                ..Settings::default()
            };
            print::header("validating configuration", settings.quiet);
            validate::validate(&file, &settings)
        }
    }
}
