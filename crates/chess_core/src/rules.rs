//! Per-kind movement legality.
//!
//! These answer "may this piece go there" from geometry and occupancy alone.
//! Whether the move leaves the mover's own king in check is decided by
//! [`Board::is_piece_movement_avoiding_check`].

use crate::board::Board;
use crate::movement::*;
use crate::square::Square;
use crate::types::{Color, Piece, PieceKind};

/// Raw legality of moving the piece on `from` to `to`.
pub fn is_valid_move(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.find_piece_at(from) else {
        return false;
    };
    match piece.kind {
        PieceKind::Pawn => is_valid_pawn_move(board, piece, from, to),
        PieceKind::King => {
            is_king_step(board, piece, from, to) || is_castling(board, piece, from, to)
        }
        _ => reaches(board, piece, from, to),
    }
}

/// Whether `piece` standing on `from` attacks `to`.
///
/// Same predicates as [`is_valid_move`] minus the moves that can never land on
/// an occupied square (pawn pushes, castling). Check detection uses this.
pub fn reaches(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => is_pawn_capture(board, piece, from, to),
        PieceKind::Knight => {
            is_l_shaped(from, to) && no_same_color_piece_at_target(board, piece.color, to)
        }
        PieceKind::Bishop => {
            is_diagonal(from, to)
                && no_piece_in_between(board, from, to)
                && no_same_color_piece_at_target(board, piece.color, to)
        }
        PieceKind::Rook => {
            is_straight(from, to)
                && no_piece_in_between(board, from, to)
                && no_same_color_piece_at_target(board, piece.color, to)
        }
        PieceKind::Queen => {
            (is_diagonal(from, to) || is_straight(from, to))
                && no_piece_in_between(board, from, to)
                && no_same_color_piece_at_target(board, piece.color, to)
        }
        PieceKind::King => is_king_step(board, piece, from, to),
    }
}

fn is_king_step(board: &Board, king: Piece, from: Square, to: Square) -> bool {
    let d = distance(from, to);
    ((is_straight(from, to) && d == 1) || (is_diagonal(from, to) && d == 2))
        && no_same_color_piece_at_target(board, king.color, to)
}

fn is_valid_pawn_move(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    if !is_upward(from, to, pawn.color) {
        return false;
    }
    if is_on_same_file(from, to) {
        let steps = distance(from, to);
        let max_steps = if !pawn.has_moved() && from.rank() == pawn.color.pawn_rank() {
            2
        } else {
            1
        };
        return steps <= max_steps
            && no_piece_at_target(board, to)
            && (steps == 1 || no_piece_in_between(board, from, to));
    }
    is_pawn_capture(board, pawn, from, to) || is_en_passant(board, pawn, from, to)
}

fn is_pawn_capture(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    is_diagonal(from, to)
        && distance(from, to) == 2
        && is_upward(from, to, pawn.color)
        && has_opponent_piece_at_target(board, pawn.color, to)
}

/// Square of the pawn taken by an en-passant capture from `from` to `to`.
pub fn en_passant_victim_square(from: Square, to: Square) -> Square {
    Square::from_index(((from.rank() - 1) * 8 + to.file()) as u8)
}

/// Diagonal pawn step onto the board's en-passant target, taking the enemy pawn
/// beside the mover. Only the side to move may capture en passant.
pub fn is_en_passant(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    pawn.kind == PieceKind::Pawn
        && pawn.color == board.turn()
        && board.en_passant() == Some(to)
        && is_diagonal(from, to)
        && distance(from, to) == 2
        && is_upward(from, to, pawn.color)
        && no_piece_at_target(board, to)
        && board
            .find_piece_at(en_passant_victim_square(from, to))
            .is_some_and(|p| p.is(pawn.color.other(), PieceKind::Pawn))
}

/// Rook start and end squares for a castling king move `from -> to`.
pub fn castling_rook_squares(color: Color, to: Square) -> (Square, Square) {
    let rank = color.back_rank();
    let (rook_file, rook_target_file) = if to.file() == 6 { (7, 5) } else { (0, 3) };
    let sq = |file: i8| Square::from_index(((rank - 1) * 8 + file) as u8);
    (sq(rook_file), sq(rook_target_file))
}

/// King two squares sideways from its unmoved home square toward an unmoved
/// rook of its color, nothing in between, and not currently in check.
///
/// Squares the king crosses are checked by the board, which simulates the
/// king standing on them.
pub fn is_castling(board: &Board, king: Piece, from: Square, to: Square) -> bool {
    if king.kind != PieceKind::King
        || king.has_moved()
        || from.rank() != king.color.back_rank()
        || from.file() != 4
        || !is_sideways(from, to)
        || distance(from, to) != 2
        || !no_piece_at_target(board, to)
    {
        return false;
    }
    let (rook_from, _) = castling_rook_squares(king.color, to);
    let rook_ready = board
        .find_piece_at(rook_from)
        .is_some_and(|r| r.is(king.color, PieceKind::Rook) && !r.has_moved());
    rook_ready
        && no_piece_in_between(board, from, rook_from)
        && !board.is_king_in_check(king.color)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
