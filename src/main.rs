//! slide48 CLI - play, replay and inspect 2048 games in the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// slide48 - a deterministic 2048 engine
#[derive(Parser, Debug)]
#[command(name = "slide48")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write logs to this file (interactive commands log nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board side length (default: 4)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Best score file
        #[arg(long, default_value = slide48::store::JsonFileStore::DEFAULT_FILE)]
        best_file: PathBuf,

        /// Save a recording of the game on exit
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Replay a recorded game
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Output format: tui, text, or json
        #[arg(short, long, default_value = "tui")]
        format: cli::ReplayFormat,

        /// Start at a specific step
        #[arg(long)]
        step: Option<usize>,
    },

    /// Show or reset the best score
    Best {
        /// Best score file
        #[arg(long, default_value = slide48::store::JsonFileStore::DEFAULT_FILE)]
        best_file: PathBuf,

        /// Reset the best score to 0
        #[arg(long)]
        reset: bool,
    },
}

impl Commands {
    /// Whether the command takes over the terminal.
    fn is_interactive(&self) -> bool {
        match self {
            Commands::Play { .. } => true,
            Commands::Replay { format, .. } => *format == cli::ReplayFormat::Tui,
            Commands::Best { .. } => false,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = cli::init_logging(args.log_file.as_deref(), args.command.is_interactive()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Play {
            seed,
            size,
            best_file,
            save,
        } => cli::play::execute(seed, size, best_file, save),

        Commands::Replay {
            recording,
            format,
            step,
        } => cli::replay::execute(recording, format, step),

        Commands::Best { best_file, reset } => cli::best::execute(best_file, reset),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
