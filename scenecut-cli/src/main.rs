// scenecut-cli/src/main.rs
//
// Entry point of the `scenecut` binary: parses the command line, sets up
// logging and dispatches to the command implementations in the library.
// Any error is printed as a single `Error: <message>` line and the process
// exits with status 1.

use clap::Parser;
use scenecut_cli::error::CliResult;
use scenecut_cli::logging::init_logging;
use scenecut_cli::{Cli, Commands, run_detect, run_evaluate, run_frames};
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let log_dir: Option<PathBuf> = if cli.no_log {
        None
    } else {
        cli.log_dir
            .clone()
            .or_else(|| cli.command.output_dir().map(|dir| dir.join("logs")))
    };
    init_logging(cli.verbose, log_dir.as_deref())?;

    match cli.command {
        Commands::Detect(args) => run_detect(args),
        Commands::Frames(args) => run_frames(args),
        Commands::Evaluate(args) => run_evaluate(args).map(|_| ()),
    }
}
