//! Explorer CLI
//!
//! List legal moves, search positions, count perft nodes and run batches.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use explorer::{
    analyze_moves, analyze_perft, analyze_search, read_positions, run_batch, ExplorerConfig,
    MoveStyle,
};

#[derive(Parser)]
#[command(name = "explorer")]
#[command(about = "Legal moves, full-width minimax and perft for chess positions", long_about = None)]
struct Cli {
    /// TOML file with [search] and [arena] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the board, its status and every legal move
    Moves {
        /// Position in FEN, quoted
        fen: String,
        /// Print moves as e2e4 instead of algebraic notation
        #[arg(long)]
        coordinate: bool,
        #[arg(long)]
        json: bool,
    },
    /// Search a position to a fixed depth
    Search {
        fen: String,
        /// Plies to search (overrides the config file)
        #[arg(short, long)]
        depth: Option<u8>,
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        fen: String,
        #[arg(short, long)]
        depth: u8,
        /// Also print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Search every FEN in a file (blank lines and # comments are skipped)
    Batch {
        file: PathBuf,
        #[arg(short, long)]
        depth: Option<u8>,
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ExplorerConfig> {
    match path {
        Some(path) => {
            let config = ExplorerConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            info!(path = %path.display(), ?config, "loaded config");
            Ok(config)
        }
        None => Ok(ExplorerConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Moves {
            fen,
            coordinate,
            json,
        } => {
            let style = if coordinate {
                MoveStyle::Coordinate
            } else {
                MoveStyle::Algebraic
            };
            let mut ctx = config.context();
            let report = analyze_moves(&mut ctx, &fen, style)?;
            if json {
                print_json(&report)?;
            } else {
                println!("{}", report.render());
            }
        }
        Command::Search { fen, depth, json } => {
            let config = config.with_depth(depth);
            let mut ctx = config.context();
            let report = analyze_search(&mut ctx, &fen, config.search.depth)?;
            if json {
                print_json(&report)?;
            } else {
                println!("{}", report.render());
            }
        }
        Command::Perft { fen, depth, divide } => {
            let mut ctx = config.context();
            let report = analyze_perft(&mut ctx, &fen, depth, divide)?;
            println!("{}", report.render());
        }
        Command::Batch { file, depth, json } => {
            let config = config.with_depth(depth);
            let entries = read_positions(&file)?;
            info!(count = entries.len(), file = %file.display(), "read batch");
            let mut ctx = config.context();
            let report = run_batch(&mut ctx, &entries, config.search.depth);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", report.render());
            }
        }
    }
    Ok(())
}
