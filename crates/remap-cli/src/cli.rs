//! CLI argument definitions for the CSV column remapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use remap_cli::handlers::DEFAULT_SEPARATOR;

#[derive(Parser)]
#[command(
    name = "csv-remap",
    version,
    about = "Map CSV columns onto a fixed set of expected columns",
    long_about = "Preview an uploaded CSV file, map its columns onto the expected columns\n\
                  from the configuration, and regenerate a comma-separated file that\n\
                  contains only the mapped columns under their expected names."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file listing the expected columns
    /// (default: $CSV_REMAP_CONFIG, then ./config.json).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the expected columns from the configuration.
    Columns,

    /// Show the first rows of a CSV file and the columns each expected column can map to.
    Preview(PreviewArgs),

    /// Regenerate a CSV file with only the mapped columns, renamed.
    Generate(GenerateArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// CSV file to preview.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator of the input file (one or more characters).
    #[arg(long = "separator", short = 's', default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Number of data rows to show.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// CSV file to regenerate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator of the input file (one or more characters).
    ///
    /// The generated file always uses a comma.
    #[arg(long = "separator", short = 's', default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Map an expected column to a source column (repeatable).
    #[arg(long = "map", short = 'm', value_name = "EXPECTED=SOURCE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    /// JSON file of `{ "expected": "source" | null }` selections naming every
    /// expected column; `--map` entries win.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Write the generated CSV here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a `data:text/csv;base64,` URI instead of the CSV text.
    #[arg(long = "data-uri", conflicts_with = "output")]
    pub data_uri: bool,
}

/// Parses `EXPECTED=SOURCE`, splitting at the first `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((canonical, source)) if !canonical.is_empty() && !source.is_empty() => {
            Ok((canonical.to_string(), source.to_string()))
        }
        _ => Err(format!("expected EXPECTED=SOURCE, got '{raw}'")),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignment_splits_at_first_equals() {
        assert_eq!(
            parse_assignment("total=a=b").unwrap(),
            ("total".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("total").is_err());
        assert!(parse_assignment("=foo").is_err());
        assert!(parse_assignment("total=").is_err());
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "csv-remap",
            "--config",
            "columns.json",
            "generate",
            "upload.csv",
            "-s",
            ";",
            "--map",
            "id=foo",
            "-m",
            "value=bar",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("columns.json")));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.separator, ";");
        assert_eq!(
            args.assignments,
            vec![
                ("id".to_string(), "foo".to_string()),
                ("value".to_string(), "bar".to_string())
            ]
        );
        assert!(!args.data_uri);
    }
}
