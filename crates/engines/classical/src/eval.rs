//! Static evaluation in pawn units, positive favoring White.

use chess_core::square::{D4, D5, E4, E5};
use chess_core::{Board, Color, Piece, PieceKind, Square};

use crate::config::EvalWeights;
use crate::tables::piece_square_value;

const CENTER: [Square; 4] = [D4, E4, D5, E5];

/// Scores positions with a fixed set of weights.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Checkmate scores as an infinity for the winner and short-circuits every
    /// other term. Mobility is measured with the legality simulation, so the
    /// board is borrowed mutably; it is left as it was passed in.
    pub fn evaluate(&self, board: &mut Board) -> f32 {
        if board.is_checkmate(Color::White) {
            return f32::NEG_INFINITY;
        }
        if board.is_checkmate(Color::Black) {
            return f32::INFINITY;
        }

        let pieces: Vec<(Square, Piece)> = board.pieces().collect();
        let endgame = !pieces.iter().any(|(_, p)| p.kind == PieceKind::Queen);

        let mut score = [0.0f32; 2];
        for &(sq, piece) in &pieces {
            let side = &mut score[piece.color.idx()];
            *side += piece.kind.value() as f32;
            *side += self.weights.piece_square * piece_square_value(piece, sq, endgame) as f32;
            *side += self.weights.mobility * board.legal_moves_from(sq).len() as f32;
            if CENTER.contains(&sq) {
                *side += self.weights.center;
            }
        }

        for color in [Color::White, Color::Black] {
            let side = &mut score[color.idx()];
            *side += if is_king_sheltered(&pieces, board.king_square(color), color) {
                self.weights.king_safety
            } else {
                -self.weights.king_safety
            };
            *side += self.pawn_structure(&pieces, color);
            if board.is_check(color) {
                *side -= self.weights.check_penalty;
            }
        }

        score[Color::White.idx()] - score[Color::Black.idx()]
    }

    fn pawn_structure(&self, pieces: &[(Square, Piece)], color: Color) -> f32 {
        let own: Vec<Square> = pawns(pieces, color).collect();
        let enemy: Vec<Square> = pawns(pieces, color.other()).collect();
        let mut score = 0.0;

        for &sq in &own {
            if !own.iter().any(|o| (o.file() - sq.file()).abs() == 1) {
                score -= self.weights.isolated_pawn;
            }
            if own.iter().any(|&o| o != sq && o.file() == sq.file()) {
                score -= self.weights.doubled_pawn;
            }
            let blocked = enemy
                .iter()
                .any(|e| (e.file() - sq.file()).abs() <= 1 && is_ahead(*e, sq, color));
            if !blocked {
                score += self.weights.passed_pawn;
            }
            if relative_rank(sq, color) >= 6 {
                score += self.weights.near_promotion;
            }
        }
        score
    }
}

/// Evaluates with the default weights.
pub fn evaluate(board: &mut Board) -> f32 {
    Evaluator::default().evaluate(board)
}

fn pawns(pieces: &[(Square, Piece)], color: Color) -> impl Iterator<Item = Square> + '_ {
    pieces
        .iter()
        .filter(move |(_, p)| p.is(color, PieceKind::Pawn))
        .map(|&(sq, _)| sq)
}

/// Rank 1..8 counted from `color`'s own back rank.
fn relative_rank(sq: Square, color: Color) -> i8 {
    match color {
        Color::White => sq.rank(),
        Color::Black => 9 - sq.rank(),
    }
}

/// Whether `sq` is further up the board than `of`, seen from `color`.
fn is_ahead(sq: Square, of: Square, color: Color) -> bool {
    relative_rank(sq, color) > relative_rank(of, color)
}

/// Out of the c-f / 3-6 box and with an own pawn in front on the king's file
/// or a neighbouring one.
fn is_king_sheltered(pieces: &[(Square, Piece)], king: Square, color: Color) -> bool {
    let in_center = (2..=5).contains(&king.file()) && (3..=6).contains(&king.rank());
    if in_center {
        return false;
    }
    pawns(pieces, color).any(|p| (p.file() - king.file()).abs() <= 1 && is_ahead(p, king, color))
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
