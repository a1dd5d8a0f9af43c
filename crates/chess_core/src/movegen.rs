//! Legal move generation.
//!
//! Candidate destinations come from the lookup tables; each candidate is then
//! confirmed by [`Board::is_piece_movement_avoiding_check`], which applies the
//! per-kind rules and the king-safety simulation.

use crate::board::Board;
use crate::lookups::{bishop_rays, king_targets, knight_targets, rook_rays, Ray};
use crate::square::Square;
use crate::square_set::SquareSet;
use crate::types::*;

/// Generate all legal moves for the side to move, returning a fresh vector.
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, &mut out);
    out
}

/// Generate all legal moves for the side to move into the provided buffer,
/// reusing it across calls.
pub fn legal_moves_into(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    let mover = board.turn();
    for from in board.occupancy(mover) {
        let piece = board.piece_at(from);
        for to in candidate_targets(board, from, piece) {
            if !board.is_piece_movement_avoiding_check(from, to) {
                continue;
            }
            let mv = Move::new(from, to, piece.kind);
            if piece.kind == PieceKind::Pawn && to.rank() == mover.promotion_rank() {
                out.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
            } else {
                out.push(mv);
            }
        }
    }
}

/// Legal destinations of the piece on `from`; empty if the square is empty.
pub fn legal_destinations(board: &mut Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.find_piece_at(from) else {
        return Vec::new();
    };
    candidate_targets(board, from, piece)
        .into_iter()
        .filter(|&to| board.is_piece_movement_avoiding_check(from, to))
        .collect()
}

/// Whether `color` has at least one legal move, stopping at the first.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    for from in board.occupancy(color) {
        let piece = board.piece_at(from);
        for to in candidate_targets(board, from, piece) {
            if board.is_piece_movement_avoiding_check(from, to) {
                return true;
            }
        }
    }
    false
}

/// Squares the piece could possibly move to. A superset of its legal moves.
fn candidate_targets(board: &Board, from: Square, piece: Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.forward();
            [(0, dir), (0, 2 * dir), (-1, dir), (1, dir)]
                .into_iter()
                .filter_map(|(df, dr)| from.offset(df, dr))
                .collect()
        }
        PieceKind::Knight => knight_targets(from),
        PieceKind::Bishop => slide(board, bishop_rays(from)),
        PieceKind::Rook => slide(board, rook_rays(from)),
        PieceKind::Queen => slide(board, rook_rays(from)) | slide(board, bishop_rays(from)),
        PieceKind::King => {
            let mut targets = king_targets(from);
            for df in [-2, 2] {
                if let Some(sq) = from.offset(df, 0) {
                    targets.insert(sq);
                }
            }
            targets
        }
    }
}

/// Ray squares up to and including the first occupied one.
fn slide(board: &Board, rays: &[Ray; 4]) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for ray in rays {
        for &sq in ray.squares() {
            targets.insert(sq);
            if board.find_piece_at(sq).is_some() {
                break;
            }
        }
    }
    targets
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
