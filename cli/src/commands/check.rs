use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use crate::{mprint, terminal::{colors, format, print}};
use netcheck_common::config::{ProbeConfig, Settings};
use netcheck_common::network::outcome::ProbeOutcome;
use netcheck_common::{success, warn};
use netcheck_core::runner::{Runner, Summary};

pub async fn check(file: &Path, timeout: Option<u64>, settings: &Settings) -> anyhow::Result<ExitCode> {
    let mut config: ProbeConfig = ProbeConfig::from_file(file)
        .with_context(|| format!("loading configuration from {}", file.display()))?;

    if let Some(seconds) = timeout {
        config = config.with_timeout_seconds(seconds);
    }
    config.validate().context("invalid configuration")?;

    let runner: Runner = Runner::default().with_jobs(settings.jobs);
    let start_time: Instant = Instant::now();

    let outcomes: Vec<ProbeOutcome> = runner
        .run(&config, |outcome| report_outcome(outcome, settings))
        .await?;

    let summary: Summary = Summary::from(outcomes.as_slice());
    print_summary(summary, start_time.elapsed(), settings);

    if settings.strict && summary.closed > 0 {
        warn!("{} endpoint(s) closed, exiting with failure", summary.closed);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn report_outcome(outcome: &ProbeOutcome, settings: &Settings) {
    if settings.quiet > 1 && outcome.is_open() {
        return;
    }
    print::print(&format::outcome_line(outcome));
}

fn print_summary(summary: Summary, total_time: Duration, settings: &Settings) {
    let open: ColoredString = format!("{} open", summary.open).bold().color(colors::OPEN);
    let closed: ColoredString = format!("{} closed", summary.closed).bold().color(colors::CLOSED);
    let total_time: ColoredString = format::elapsed(total_time).bold().yellow();
    let output: &ColoredString =
        &format!("Check Complete: {open}, {closed} in {total_time}").color(colors::TEXT_DEFAULT);

    match settings.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        1 => {
            mprint!();
            success!("{}", output)
        }
        _ => {}
    }
}
