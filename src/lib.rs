pub mod cli;
pub mod config;
pub mod display;
pub mod event;
pub mod filter;

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use event::{Event, EventParseError, Organization, Repository, parse_events};
pub use filter::{Condition, Filter, FilterError, FilterExpression, FilterParseError};

/// Install the stderr log subscriber; `RUST_LOG` wins over the flags.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Build the filter from the filter file, then the `--condition` expressions
pub fn build_filter(filter_file: Option<&Path>, expressions: &[String]) -> Result<Filter> {
    let mut filter = config::load_config(filter_file)?;

    for expr in expressions {
        let condition = FilterExpression::parse(expr)
            .with_context(|| format!("Invalid condition expression '{expr}'"))?;
        filter.conditions.push(condition);
    }

    Ok(filter)
}

fn read_events(path: Option<&Path>) -> Result<Vec<Event>> {
    let input = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file '{}'", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read events from stdin")?;
            buf
        }
    };

    let events = parse_events(&input)?;
    tracing::debug!(count = events.len(), "parsed events");
    Ok(events)
}

pub fn run() -> Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let filter = build_filter(cli.filter_file.as_deref(), &cli.conditions)?;
    tracing::info!(conditions = filter.conditions.len(), "filter loaded");

    match &cli.command {
        Commands::Match { events, count } => {
            crate::filter::print_filter_warnings(&filter);

            let events = read_events(events.as_deref())?;
            let matched = filter.select(&events);

            if *count {
                println!("{}", matched.len());
                return Ok(());
            }

            match cli.format {
                OutputFormat::Text => {
                    if !matched.is_empty() {
                        println!("{}", display::format_events_table(&matched));
                    }
                    display::display_match_summary(matched.len(), events.len());
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&matched)
                        .context("Failed to serialize matched events")?;
                    println!("{json}");
                }
            }
        }
        Commands::Explain => match cli.format {
            OutputFormat::Text => println!("{}", display::format_explanation(&filter)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&filter)
                    .context("Failed to serialize filter")?;
                println!("{json}");
            }
        },
        Commands::Check => {
            if let Err(errors) = filter.validate() {
                for err in &errors {
                    eprintln!("error: {err}");
                }
                bail!("{} invalid condition(s)", errors.len());
            }
            println!("Filter is valid ({} conditions)", filter.conditions.len());
        }
    }

    Ok(())
}
