//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p explorer_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 4 from starting position
//!   cargo flamegraph --example perft_bench -p explorer_core
//!
//!   # Custom depth and position
//!   cargo flamegraph --example perft_bench -p explorer_core -- 4 "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"

use std::env;
use std::time::{Duration, Instant};

use explorer_core::{perft, ArenaLimits, ExploreResult, Position, SearchConfig, SearchContext};

/// Standard test positions for profiling
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    // If FEN provided, use single position mode
    let outcome = match args.get(2) {
        Some(fen) => run_single_position(fen, depth),
        None => run_all_positions(depth),
    };
    if let Err(e) = outcome {
        eprintln!("perft failed: {e}");
        std::process::exit(1);
    }
}

fn timed_perft(pos: Position, depth: u8) -> ExploreResult<(u64, Duration, u64)> {
    let limits = ArenaLimits {
        max_positions: 64_000_000,
        max_moves: 64_000_000,
        ..ArenaLimits::default()
    };
    let mut ctx = SearchContext::new(SearchConfig::default(), limits);
    let root = ctx.insert_root(pos)?;

    let start = Instant::now();
    let nodes = perft(&mut ctx, root, depth)?;
    Ok((nodes, start.elapsed(), ctx.stats().positions_allocated))
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(fen: &str, depth: u8) -> Result<(), Box<dyn std::error::Error>> {
    let pos = Position::from_fen(fen)?;

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    let (nodes, elapsed, allocated) = timed_perft(pos, depth)?;

    println!("Nodes: {nodes}");
    println!("Positions allocated: {allocated}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
    Ok(())
}

fn run_all_positions(depth: u8) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let pos = Position::from_fen(fen)?;

        print!("{name:.<30}");

        let (nodes, elapsed, _) = timed_perft(pos, depth)?;
        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
