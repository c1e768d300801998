pub mod check;
pub mod validate;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "netcheck", version)]
#[command(about = "Check that expected TCP and UDP endpoints are reachable.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output; -qq prints only CLOSED endpoints
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// More log output; -vv traces every probe step
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe every endpoint listed in a configuration file
    #[command(alias = "c")]
    Check {
        /// YAML file with `tcp`, `udp` and `timeout_seconds`
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Override `timeout_seconds` from the file
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Probes in flight at once; 1 probes one endpoint at a time
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        jobs: u16,

        /// Exit with status 1 if any endpoint is CLOSED
        #[arg(long)]
        strict: bool,
    },
    /// Load and validate a configuration file without probing
    #[command(alias = "v")]
    Validate {
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
