//! Classical Chess Engine
//!
//! Minimax search with alpha-beta pruning over a hand-tuned evaluation.
//!
//! - White maximizes, Black minimizes; scores are in pawns
//! - Quiescence search over captures and queen promotions
//! - Transposition table keyed by the board's Zobrist hash
//! - MVV-LVA move ordering
//! - Weights and depths loadable from TOML

pub mod config;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod tables;
pub mod transposition;

use chess_core::{Board, Engine, SearchResult};

pub use config::{ConfigError, EngineConfig, EvalWeights, SearchConfig};
pub use eval::{evaluate, Evaluator};
pub use search::{BestMove, Searcher, MATE, MATE_BOUND};

#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    searcher: Searcher,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        let depth = depth.max(1);
        let best = self.searcher.search_to_depth(board, depth);
        SearchResult {
            best_move: best.map(|b| b.mv),
            score: best.map_or(0.0, |b| b.score),
            depth,
            nodes: self.searcher.nodes(),
        }
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.searcher.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let Ok(value) = value.trim().parse::<u8>() else {
            return false;
        };
        match name {
            "Depth" => self.searcher.set_depth(value),
            "QuiescenceDepth" => self.searcher.set_quiescence_depth(value),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_trait() {
        let mut engine = ClassicalEngine::new();
        let mut board = Board::startpos();
        let result = engine.search(&mut board, 1);
        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 1);
        assert!(result.nodes > 0);
        assert_eq!(engine.name(), "Classical v1.0");
    }

    #[test]
    fn test_set_option() {
        let mut engine = ClassicalEngine::new();
        assert!(engine.set_option("Depth", "6"));
        assert_eq!(engine.searcher().config().depth, 6);
        assert!(engine.set_option("QuiescenceDepth", "2"));
        assert_eq!(engine.searcher().config().quiescence_depth, 2);
        assert!(!engine.set_option("Depth", "deep"));
        assert!(!engine.set_option("Hash", "64"));
    }
}
