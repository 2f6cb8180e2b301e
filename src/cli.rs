use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Match GitHub activity events against declarative conditions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON5 file with a `conditions` list
    #[arg(short = 'f', long, global = true, env = "GHFILTER_FILTER")]
    pub filter_file: Option<PathBuf>,

    /// Condition expression, e.g. 'type:IssuesEvent action:opened' (repeatable)
    #[arg(short, long = "condition", global = true)]
    pub conditions: Vec<String>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to color output
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the events that match the filter
    Match {
        /// Events as a JSON array or newline-delimited JSON ("-" or omitted for stdin)
        events: Option<PathBuf>,

        /// Print only the number of matching events
        #[arg(long)]
        count: bool,
    },
    /// Describe the filter in plain words
    Explain,
    /// Validate the filter's regular expressions
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_conditions_keep_order() {
        let cli = Cli::try_parse_from([
            "ghfilter",
            "-c",
            "type:IssuesEvent",
            "--condition",
            "!label:wontfix",
            "match",
            "events.json",
        ])
        .unwrap();
        assert_eq!(cli.conditions, vec!["type:IssuesEvent", "!label:wontfix"]);
        match cli.command {
            Commands::Match { events, count } => {
                assert_eq!(events, Some(PathBuf::from("events.json")));
                assert!(!count);
            }
            _ => panic!("expected match command"),
        }
    }
}
