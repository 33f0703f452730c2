//! calc - Interactive arithmetic calculator
//!
//! A read-eval-print loop over calc-core with undoable history and CSV
//! persistence.

use anyhow::{Context, Result};
use calc_repl::{load_initial_history, Session, Settings};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Interactive calculator with undo/redo and CSV history")]
#[command(long_about = "Interactive calculator with undo/redo and CSV history

Operations:
  +  -  *  /  ^  root     (root: first number is the degree, second the radicand)

Session commands:
  help, history, clear, undo, redo, save [path], load [path], exit

Environment:
  AUTO_SAVE           Save after every calculation (1/true/yes/on)
  HISTORY_CSV_PATH    Default CSV file for save/load/auto-save
  RUST_LOG            Log filter (logs go to stderr)

A .env file in the working directory is read when present.")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Save history after every successful calculation (overrides AUTO_SAVE)
    #[arg(long)]
    auto_save: bool,

    /// Default CSV file for save/load (overrides HISTORY_CSV_PATH)
    #[arg(long, value_name = "PATH")]
    csv_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenv::dotenv().ok();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging; stderr keeps the REPL transcript clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let settings = Settings::load()
        .context("Failed to load settings from environment")?
        .with_overrides(cli.auto_save, cli.csv_path);
    debug!(?settings, "settings loaded");

    let history = load_initial_history(&settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(settings, history, stdin.lock(), stdout.lock());
    session.run()
}
