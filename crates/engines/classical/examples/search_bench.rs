//! Search benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example search_bench -p classical_engine -- [depth] [fen]
//!
//! Without a FEN every suite position is searched at the given depth
//! (default 3).

use std::env;
use std::time::{Duration, Instant};

use chess_core::{Board, START_FEN};
use classical_engine::Searcher;

const SUITE: &[(&str, &str)] = &[
    ("Start", START_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "Italian",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    let positions: Vec<(&str, &str)> = match args.get(2) {
        Some(fen) => vec![("Custom", fen.as_str())],
        None => SUITE.to_vec(),
    };

    let mut searcher = Searcher::default();
    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    println!("=== Search Benchmark (depth {depth}) ===");
    for (name, fen) in positions {
        let mut board = match Board::from_fen(fen) {
            Ok(board) => board,
            Err(err) => {
                eprintln!("{name}: {err}");
                continue;
            }
        };

        let start = Instant::now();
        let best = searcher.search_to_depth(&mut board, depth);
        let elapsed = start.elapsed();
        let nodes = searcher.nodes();
        total_nodes += nodes;
        total_time += elapsed;

        let best = best.map_or_else(|| "none".to_string(), |b| format!("{} ({:+.2})", b.mv, b.score));
        println!("{name:.<20} {best:<18} {nodes:>10} nodes in {elapsed:>8.3?} ({:>8.0} nps)", nps(nodes, elapsed));
    }

    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
