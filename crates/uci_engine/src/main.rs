//! UCI-style console for the classical engine.
//!
//! Usage: `uci_engine [--config engine.toml]`
//!
//! Protocol lines go to stdout; logs go to stderr and are filtered with
//! `RUST_LOG` (default `info`).

mod session;

use std::io::{self, BufRead};
use std::process::ExitCode;

use classical_engine::{ClassicalEngine, EngineConfig, Evaluator};
use session::{Flow, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "could not load engine config");
            return ExitCode::FAILURE;
        }
    };
    info!(depth = config.search.depth, quiescence = config.search.quiescence_depth, "engine ready");

    let depth = config.search.depth;
    let evaluator = Evaluator::new(config.weights.clone());
    let mut session = Session::new(ClassicalEngine::with_config(config), evaluator, depth);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        match session.handle(&line, &mut stdout) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                error!(%err, "stdout closed");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn load_config() -> Result<EngineConfig, classical_engine::ConfigError> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return EngineConfig::load(path);
            }
        }
    }
    Ok(EngineConfig::default())
}
