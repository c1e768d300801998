use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use colored::Colorize;

use crate::terminal::{colors, print};
use netcheck_common::config::{ProbeConfig, Settings};
use netcheck_common::success;

pub fn validate(file: &Path, settings: &Settings) -> anyhow::Result<ExitCode> {
    let config: ProbeConfig = ProbeConfig::from_file(file)
        .with_context(|| format!("loading configuration from {}", file.display()))?;
    config.validate().context("invalid configuration")?;

    if settings.quiet == 0 {
        let malformed: usize = config.malformed_targets().count();
        print::set_key_width(["TCP", "UDP", "Timeout", "Malformed"]);
        print::aligned_line("TCP", format!("{} targets", config.tcp.len()));
        print::aligned_line("UDP", format!("{} targets", config.udp.len()));
        print::aligned_line("Timeout", format!("{}s", config.timeout()?.as_secs()));
        if malformed > 0 {
            print::aligned_line("Malformed", format!("{malformed} (reported CLOSED)").color(colors::CLOSED));
        }
    }

    success!("{} is valid", file.display());
    Ok(ExitCode::SUCCESS)
}
