//! Command-line interface definitions and parsing.

use crate::accessor::BatchPolicy;
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::output::FieldSelection;
use clap::Parser;
use std::path::PathBuf;

/// prefetch - Windows Prefetch execution-history extractor
#[derive(Parser, Debug)]
#[command(name = "prefetch")]
#[command(about = "prefetch - Windows Prefetch (.pf) execution-history extractor", version)]
#[command(long_about = "Extracts last-run time, run count and accessed files from Windows Prefetch artifacts:
• Single artifact inspection (--file)
• Directory-wide timeline, newest run first (-d DIR --timeline)
• Case-insensitive search across accessed files (-d DIR --search TERM)
• Bulk export to JSON or CSV (-d DIR --export --output FILE)")]
pub struct Args {
    /// Single prefetch file to inspect
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Directory of prefetch files (required by --timeline, --search and --export)
    #[arg(short = 'd', long = "directory")]
    pub directory: Option<PathBuf>,

    /// Show the last run time of --file
    #[arg(long)]
    pub last_run: bool,

    /// Show the run count of --file
    #[arg(long)]
    pub run_count: bool,

    /// List the files accessed by --file
    #[arg(long)]
    pub open_files: bool,

    /// Search accessed files in the directory (case-insensitive substring)
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Print a timeline of the directory, most recent run first
    #[arg(long)]
    pub timeline: bool,

    /// Export every record in the directory to --output
    #[arg(long)]
    pub export: bool,

    /// Export format, json when omitted (only with --export)
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Export destination file (only with --export)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Display timestamps in specified timezone (e.g., "UTC+8", "UTC-5", "UTC")
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// Skip unreadable prefetch files instead of aborting the whole directory
    #[arg(long)]
    pub continue_on_error: bool,
}

/// Operation selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Single { path: PathBuf, fields: FieldSelection },
    Timeline { directory: PathBuf },
    Search { directory: PathBuf, term: String },
    Export { directory: PathBuf, format: ExportFormat, output: PathBuf },
}

/// Parsed and validated CLI configuration
#[derive(Debug)]
pub struct Config {
    pub mode: Mode,
    pub timezone: chrono::FixedOffset,
    pub batch_policy: BatchPolicy,
}

impl Config {
    /// Parse and validate CLI arguments into a configuration
    pub fn from_args(args: Args) -> Result<Self> {
        let timezone = crate::datetime::parse_timezone(&args.timezone)?;

        let batch_policy = if args.continue_on_error {
            BatchPolicy::ContinueOnError
        } else {
            BatchPolicy::FailFast
        };

        let mode = Self::select_mode(args)?;

        Ok(Config {
            mode,
            timezone,
            batch_policy,
        })
    }

    fn select_mode(args: Args) -> Result<Mode> {
        let directory_ops = [args.timeline, args.search.is_some(), args.export]
            .iter()
            .filter(|selected| **selected)
            .count();

        if directory_ops > 1 {
            return Err(Error::InvalidInput(
                "Choose only one of --timeline, --search or --export".to_string(),
            ));
        }

        if !args.export && (args.format.is_some() || args.output.is_some()) {
            return Err(Error::InvalidInput(
                "--format and --output are only used with --export".to_string(),
            ));
        }

        let fields = FieldSelection {
            last_run: args.last_run,
            run_count: args.run_count,
            open_files: args.open_files,
        };

        if directory_ops == 0 {
            return match (args.file, args.directory) {
                (Some(path), None) => Ok(Mode::Single { path, fields }),
                (Some(_), Some(_)) => Err(Error::InvalidInput(
                    "Use either --file or -d, not both".to_string(),
                )),
                (None, _) if !fields.is_empty() => Err(Error::MissingArgument(
                    "--last-run, --run-count and --open-files require --file <path>".to_string(),
                )),
                (None, Some(_)) => Err(Error::MissingArgument(
                    "-d requires one of --timeline, --search <term> or --export".to_string(),
                )),
                (None, None) => Err(Error::MissingArgument(
                    "Nothing to do: supply --file <path> or -d <directory>".to_string(),
                )),
            };
        }

        if args.file.is_some() {
            return Err(Error::InvalidInput(
                "--file cannot be combined with --timeline, --search or --export".to_string(),
            ));
        }

        let flag = if args.timeline {
            "--timeline"
        } else if args.search.is_some() {
            "--search"
        } else {
            "--export"
        };
        let directory = args.directory.ok_or_else(|| {
            Error::MissingArgument(format!("{} requires -d <directory>", flag))
        })?;

        if let Some(term) = args.search {
            return Ok(Mode::Search {
                directory,
                term: term.to_lowercase(),
            });
        }

        if args.export {
            let output = args.output.ok_or_else(|| {
                Error::MissingArgument("--export requires --output <path>".to_string())
            })?;
            return Ok(Mode::Export {
                directory,
                format: args.format.unwrap_or_default(),
                output,
            });
        }

        Ok(Mode::Timeline { directory })
    }
}
