//! Main entry point for the prefetch CLI application.

use clap::{CommandFactory, Parser};
use prefetch::{app::App, cli::Args, cli::Config};
use std::process::ExitCode;

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    setup_logging();

    if std::env::args_os().len() <= 1 {
        eprintln!("{}", Args::command().render_help());
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    let result = Config::from_args(args).and_then(|config| App::new(config).run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
