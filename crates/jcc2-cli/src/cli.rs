//! CLI argument definitions for the JCC2 survey processor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "jcc2-processor",
    version,
    about = "Process JCC2 survey CSV exports",
    long_about = "Process JCC2 survey CSV exports with embedded per-column schema rows.\n\n\
                  Detects the export format (user questionnaire or data collection),\n\
                  types every column from its schema tag, validates the answers, and\n\
                  produces section, application, and format-specific analyses."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// Disable ANSI colors in log output.
    #[arg(long = "log-no-color", global = true)]
    pub log_no_color: bool,

    /// Omit the module path from log lines.
    #[arg(long = "log-no-target", global = true)]
    pub log_no_target: bool,

    /// Omit timestamps from log lines.
    #[arg(long = "log-no-timestamps", global = true)]
    pub log_no_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, validate, and analyze a survey export.
    Process(ProcessArgs),

    /// Detect the format of a survey export from its header row.
    Detect(DetectArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the survey CSV export.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the JSON summary into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of validation findings to print.
    #[arg(long = "max-errors", value_name = "N", default_value_t = 20)]
    pub max_errors: usize,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Path to the survey CSV export.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
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
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn process_defaults() {
        let cli = Cli::parse_from(["jcc2-processor", "process", "survey.csv"]);
        let Command::Process(args) = cli.command else {
            panic!("expected process command");
        };
        assert_eq!(args.file, PathBuf::from("survey.csv"));
        assert_eq!(args.output_dir, None);
        assert_eq!(args.max_errors, 20);
    }

    #[test]
    fn log_flags_are_global() {
        let cli = Cli::parse_from([
            "jcc2-processor",
            "detect",
            "survey.csv",
            "--log-format",
            "json",
            "--log-no-timestamps",
        ]);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(cli.log_no_timestamps);
        assert!(!cli.log_no_color);
    }
}
