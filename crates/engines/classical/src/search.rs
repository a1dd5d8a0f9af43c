//! Minimax with alpha-beta pruning, quiescence search and a transposition
//! table.
//!
//! Scores are from White's point of view: White maximizes, Black minimizes.
//! Mate is `MATE - ply` for the winning side, so shorter mates score higher.

use chess_core::{Board, Color, Move};
use tracing::debug;

use crate::config::{EngineConfig, SearchConfig};
use crate::eval::Evaluator;
use crate::ordering::{order_moves, tactical_moves};
use crate::transposition::{Bound, TranspositionTable, TtEntry};

pub const MATE: f32 = 100_000.0;
/// Scores beyond this are mates.
pub const MATE_BOUND: f32 = MATE - 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMove {
    pub mv: Move,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    evaluator: Evaluator,
    tt: TranspositionTable,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Searcher {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.search.tt_capacity),
            evaluator: Evaluator::new(config.weights),
            config: config.search,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth.max(1);
    }

    pub fn set_quiescence_depth(&mut self, depth: u8) {
        self.config.quiescence_depth = depth;
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.nodes = 0;
    }

    /// Best move for the side to move at the configured depth, or `None` when
    /// it has no legal move or a promotion is still waiting for its piece.
    pub fn compute_best_move(&mut self, board: &mut Board) -> Option<BestMove> {
        self.search_to_depth(board, self.config.depth)
    }

    /// Searches `depth` plies (at least one). The cache is cleared first, so the
    /// same board and depth always give the same answer.
    pub fn search_to_depth(&mut self, board: &mut Board, depth: u8) -> Option<BestMove> {
        self.clear();
        if let Some((from, to)) = board.pending_promotion() {
            debug!(%from, %to, "promotion pending, nothing to search");
            return None;
        }
        let depth = depth.max(1);
        let (score, mv) = self.search(board, depth, 0, f32::NEG_INFINITY, f32::INFINITY);
        debug!(
            depth,
            nodes = self.nodes,
            score,
            best = %mv.map_or_else(|| "none".to_string(), |m| m.to_string()),
            "search finished"
        );
        mv.map(|mv| BestMove { mv, score })
    }

    fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        ply: u32,
        mut alpha: f32,
        mut beta: f32,
    ) -> (f32, Option<Move>) {
        if depth == 0 {
            return (self.quiescence(board, ply, 0, alpha, beta), None);
        }
        self.nodes += 1;

        let turn = board.turn();
        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return (terminal_score(board, turn, ply), None);
        }
        if ply > 0 && board.is_draw() {
            return (0.0, None);
        }

        let hash = board.hash();
        let mut hash_move = None;
        if ply > 0 {
            if let Some(entry) = self.tt.probe(hash).copied() {
                hash_move = entry.best_move;
                if entry.depth >= depth {
                    let score = score_from_tt(entry.score, ply);
                    match entry.bound {
                        Bound::Exact => return (score, entry.best_move),
                        Bound::Lower => alpha = alpha.max(score),
                        Bound::Upper => beta = beta.min(score),
                    }
                    if beta <= alpha {
                        return (score, entry.best_move);
                    }
                }
            }
        }

        order_moves(board, &mut moves);
        if let Some(pos) = hash_move.and_then(|hm| moves.iter().position(|&m| m == hm)) {
            moves[..=pos].rotate_right(1);
        }

        let (alpha_original, beta_original) = (alpha, beta);
        let maximizing = turn == Color::White;
        let mut best_score = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let Some(mut child) = board.apply(mv) else {
                continue;
            };
            let (score, _) = self.search(&mut child, depth - 1, ply + 1, alpha, beta);
            drop(child);

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        if best_move.is_none() {
            return (0.0, None);
        }

        let bound = if best_score <= alpha_original {
            Bound::Upper
        } else if best_score >= beta_original {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(TtEntry {
            hash,
            score: score_to_tt(best_score, ply),
            depth,
            bound,
            best_move,
        });
        (best_score, best_move)
    }

    /// Resolves captures and queen promotions so leaves are not scored in the
    /// middle of an exchange. `extra` counts plies past the nominal depth.
    fn quiescence(&mut self, board: &mut Board, ply: u32, extra: u8, mut alpha: f32, mut beta: f32) -> f32 {
        self.nodes += 1;

        let turn = board.turn();
        let moves = board.legal_moves();
        if moves.is_empty() {
            return terminal_score(board, turn, ply);
        }
        if board.is_draw() {
            return 0.0;
        }

        let stand_pat = self.static_score(board, ply);
        if extra >= self.config.quiescence_depth {
            return stand_pat;
        }

        let maximizing = turn == Color::White;
        if maximizing {
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return stand_pat;
            }
            beta = beta.min(stand_pat);
        }

        let mut best = stand_pat;
        for mv in tactical_moves(board, &moves) {
            let Some(mut child) = board.apply(mv) else {
                continue;
            };
            let score = self.quiescence(&mut child, ply + 1, extra + 1, alpha, beta);
            drop(child);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Evaluator score with its checkmate infinities turned into mate scores.
    fn static_score(&self, board: &mut Board, ply: u32) -> f32 {
        let score = self.evaluator.evaluate(board);
        if score.is_infinite() {
            score.signum() * (MATE - ply as f32)
        } else {
            score
        }
    }
}

/// Score of a position where `turn` has no legal move.
fn terminal_score(board: &Board, turn: Color, ply: u32) -> f32 {
    if !board.is_king_in_check(turn) {
        return 0.0;
    }
    match turn {
        Color::White => -(MATE - ply as f32),
        Color::Black => MATE - ply as f32,
    }
}

/// Mate scores are cached relative to the node that stores them.
fn score_to_tt(score: f32, ply: u32) -> f32 {
    if score > MATE_BOUND {
        score + ply as f32
    } else if score < -MATE_BOUND {
        score - ply as f32
    } else {
        score
    }
}

fn score_from_tt(score: f32, ply: u32) -> f32 {
    if score > MATE_BOUND {
        score - ply as f32
    } else if score < -MATE_BOUND {
        score + ply as f32
    } else {
        score
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
