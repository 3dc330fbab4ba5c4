//! Demo wrapper binary for the flagline engine.
//!
//! Configures a realistic registry, parses the process's argv through the
//! engine, and prints either the help/version text or a JSON summary of the
//! parse. Exit codes follow the usual convention: 0 on success and on
//! help/version early exit, 1 on a parse error, 2 on validation failure.
//!
//! Set `RUST_LOG=debug` to watch the dispatcher's per-token decisions.

use std::process::ExitCode;

use flagline_core::{Arguments, ConfigError, ParseOutcome};
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn build_arguments() -> Result<Arguments, ConfigError> {
    let mut args = Arguments::new("flagline", PACKAGE_VERSION);
    args.add_switch("verbose", "Enable verbose output", Some('v'))?;
    args.add_switch("pretty", "Pretty-print the JSON summary", Some('p'))?;
    args.add_argument("output", "Where to write results", Some('o'), None)?;
    args.add_argument("tag", "Labels attached to the run (repeatable)", Some('t'), None)?;
    args.enable_append("tag", ',')?;
    args.add_multi("include", "Additional search paths", Some('I'), 0, 8)?;
    args.add_positional("input", "Input files", 1, 0)?;
    Ok(args)
}

fn print_summary(args: &Arguments) -> ExitCode {
    let summary = args.summary();
    let rendered = if args.is_set("pretty").unwrap_or(false) {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("flagline: failed to serialize summary: {err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = match build_arguments() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("flagline: configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match args.parse_env() {
        Ok(ParseOutcome::Help) => {
            print!("{}", args.help_text());
            ExitCode::SUCCESS
        }
        Ok(ParseOutcome::Version) => {
            println!("{}", args.version_text());
            ExitCode::SUCCESS
        }
        Ok(ParseOutcome::Ok) => print_summary(&args),
        Ok(ParseOutcome::ValidationFailed(_)) => {
            eprint!("{}", args.report());
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("flagline: {err}");
            ExitCode::FAILURE
        }
    }
}
