use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::{Directive, EnvFilter, Targets};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::terminal::spinner;

/// Raw terminal output, written without a status symbol.
pub const PRINT_TARGET: &str = "netcheck::print";
const SUCCESS_TARGET: &str = "netcheck::success";

pub struct NetcheckFormatter;

impl<S, N> FormatEvent<S, N> for NetcheckFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawMessage::default();
            event.record(&mut visitor);
            return writeln!(writer, "{}", visitor.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            _ if meta.target() == SUCCESS_TARGET => ("[+]", |s| s.green().bold()),
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[*]", |s| s.cyan().bold()),
            Level::WARN => ("[!]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Pulls the `raw_msg` field out of a print event.
#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Level for the library crates, from `-v` count. `RUST_LOG` wins when set.
fn default_directives(verbose: u8) -> String {
    let level: &str = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,netcheck=info,netcheck_core={level},netcheck_common={level}")
}

/// Installs the global subscriber: formatted events go through the
/// indicatif writer so they never tear a running spinner.
pub fn init_logging(verbose: u8, quiet: u8) {
    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner::sweep_style());
    let writer = indicatif_layer.get_stdout_writer();

    let mut env_filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // Result lines must survive any RUST_LOG setting.
    if let Ok(directive) = format!("{PRINT_TARGET}=info").parse::<Directive>() {
        env_filter = env_filter.add_directive(directive);
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(NetcheckFormatter)
        .with_writer(writer)
        .with_filter(env_filter);

    // Spinners only for the sweep and probe spans, and not at all when quiet.
    let spinner_level = if quiet > 0 { tracing::level_filters::LevelFilter::OFF } else { Level::INFO.into() };
    let spinner_filter: Targets = Targets::new().with_target("netcheck_core::runner", spinner_level);

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(spinner_filter))
        .try_init();
}
