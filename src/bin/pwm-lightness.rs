use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use pwm_lightness::{DEFAULT_MAX_INPUT, PwmTable};

const USAGE: &str = "Usage: pwm-lightness MAX_OUTPUT [MAX_INPUT]
  MAX_OUTPUT and MAX_INPUT are positive integers; MAX_INPUT defaults to 255.";

/// Print a CIE 1931 lightness table mapping 0..=MAX_INPUT to 0..=MAX_OUTPUT.
///
/// Output is a single comma-separated line on stdout.
#[derive(Parser, Debug)]
#[command(name = "pwm-lightness", version)]
struct Cli {
    /// Largest PWM value in the table
    #[arg(allow_negative_numbers = true)]
    max_output: u32,

    /// Largest raw input value (table length - 1)
    #[arg(default_value_t = DEFAULT_MAX_INPUT, allow_negative_numbers = true)]
    max_input: u32,

    /// Log filter used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return usage_error(clap_reason(&err)),
    };

    if let Err(err) = setup_logging(&cli.log_level) {
        return usage_error(format_args!("{err:#}"));
    }

    let table = match pwm_lightness::get_table(cli.max_output, cli.max_input) {
        Ok(table) => table,
        Err(err) => return usage_error(err),
    };

    match print_table(&table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Report a bad invocation on stderr.
fn usage_error(reason: impl Display) -> ExitCode {
    eprintln!("{USAGE}\nerror: {reason}");
    ExitCode::FAILURE
}

/// clap's message without its own usage and help hint, e.g.
/// `invalid value 'abc' for '<MAX_OUTPUT>': invalid digit found in string`.
fn clap_reason(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered.split("\n\n").next().unwrap_or_default().trim_end();
    message.strip_prefix("error: ").unwrap_or(message).to_owned()
}

/// Setup logging on stderr so stdout carries only the table.
fn setup_logging(level: &str) -> Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level `{level}`"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

fn print_table(table: &PwmTable) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{table}").context("writing table to stdout")?;
    out.flush().context("flushing stdout")
}
