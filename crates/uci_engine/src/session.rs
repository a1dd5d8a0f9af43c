//! Command handling for the console, kept apart from stdin/stdout so it can
//! be driven from tests.

use std::io::{self, Write};

use chess_core::{divide, move_to_uci, set_position_from_uci, Board, Engine};
use classical_engine::{ClassicalEngine, Evaluator};
use tracing::{info, warn};

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    board: Board,
    engine: ClassicalEngine,
    evaluator: Evaluator,
    depth: u8,
}

impl Session {
    pub fn new(engine: ClassicalEngine, evaluator: Evaluator, depth: u8) -> Self {
        Self {
            board: Board::startpos(),
            engine,
            evaluator,
            depth: depth.max(1),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(out, "option name Depth type spin default {} min 1 max 12", self.depth)?;
                writeln!(
                    out,
                    "option name QuiescenceDepth type spin default {} min 0 max 16",
                    self.engine.searcher().config().quiescence_depth
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.board = Board::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut self.board, &parts[1..]) {
                    warn!(%err, "rejected position command");
                    writeln!(out, "info string {err}")?;
                }
            }
            "go" => {
                let depth = value_after(&parts, "depth").unwrap_or(self.depth);
                let result = self.engine.search(&mut self.board, depth);
                info!(depth = result.depth, nodes = result.nodes, score = result.score, "go");
                writeln!(
                    out,
                    "info depth {} nodes {} score {:.2}",
                    result.depth, result.nodes, result.score
                )?;
                match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv))?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "eval" => {
                let score = self.evaluator.evaluate(&mut self.board);
                writeln!(out, "eval {score:.2}")?;
            }
            "perft" => {
                let depth = parts.get(1).and_then(|d| d.parse().ok()).unwrap_or(1);
                let mut total = 0;
                for (mv, nodes) in divide(&mut self.board, depth) {
                    writeln!(out, "{}: {nodes}", move_to_uci(mv))?;
                    total += nodes;
                }
                writeln!(out, "nodes {total}")?;
            }
            "undo" => {
                if !self.board.undo() {
                    writeln!(out, "info string nothing to undo")?;
                }
            }
            "redo" => {
                if !self.board.redo() {
                    writeln!(out, "info string nothing to redo")?;
                }
            }
            "d" => {
                write!(out, "{}", self.board)?;
                writeln!(out, "fen {}", self.board.to_fen())?;
                writeln!(out, "hash {:016x}", self.board.hash())?;
            }
            "quit" => return Ok(Flow::Quit),
            other => warn!(command = other, "unknown command"),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// `setoption name <id> value <x>`
    fn set_option(&mut self, args: &[&str]) {
        let (Some(name), Some(value)) = (word_after(args, "name"), word_after(args, "value")) else {
            return;
        };
        if name == "Depth" {
            if let Ok(depth) = value.parse::<u8>() {
                self.depth = depth.max(1);
            }
        }
        if !self.engine.set_option(name, value) {
            warn!(name, value, "unsupported option");
        }
    }
}

fn word_after<'a>(parts: &[&'a str], key: &str) -> Option<&'a str> {
    let at = parts.iter().position(|&p| p == key)?;
    parts.get(at + 1).copied()
}

fn value_after(parts: &[&str], key: &str) -> Option<u8> {
    word_after(parts, key)?.parse().ok()
}
