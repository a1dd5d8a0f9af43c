//! Geometric predicates over two squares and simple occupancy checks.
//!
//! None of these know about piece kinds; `rules` combines them per kind.
//! A move onto its own start square is never a movement, so every predicate
//! answers `false` (or distance `0`) for `from == to`.

use crate::board::Board;
use crate::square::Square;
use crate::types::Color;

#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (to.file() - from.file(), to.rank() - from.rank())
}

pub fn is_diagonal(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    from != to && df.abs() == dr.abs()
}

pub fn is_straight(from: Square, to: Square) -> bool {
    from != to && (from.file() == to.file() || from.rank() == to.rank())
}

pub fn is_l_shaped(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

/// True when `to` lies toward the opponent's side for `color`.
pub fn is_upward(from: Square, to: Square, color: Color) -> bool {
    let dr = to.rank() - from.rank();
    match color {
        Color::White => dr > 0,
        Color::Black => dr < 0,
    }
}

pub fn is_sideways(from: Square, to: Square) -> bool {
    from.rank() == to.rank() && from.file() != to.file()
}

pub fn is_on_same_file(from: Square, to: Square) -> bool {
    from.file() == to.file()
}

/// Manhattan distance: a one-step diagonal counts as 2.
pub fn distance(from: Square, to: Square) -> i8 {
    let (df, dr) = deltas(from, to);
    df.abs() + dr.abs()
}

/// Walks the unit step from `from` toward `to` and fails on the first occupied
/// square before `to`. Squares that are neither on a line nor a diagonal are
/// never "clear".
pub fn no_piece_in_between(board: &Board, from: Square, to: Square) -> bool {
    if !is_diagonal(from, to) && !is_straight(from, to) {
        return false;
    }
    let (df, dr) = deltas(from, to);
    let (sf, sr) = (df.signum(), dr.signum());
    let mut cur = from;
    while let Some(next) = cur.offset(sf, sr) {
        if next == to {
            return true;
        }
        if board.find_piece_at(next).is_some() {
            return false;
        }
        cur = next;
    }
    false
}

pub fn no_piece_at_target(board: &Board, to: Square) -> bool {
    board.find_piece_at(to).is_none()
}

pub fn no_same_color_piece_at_target(board: &Board, color: Color, to: Square) -> bool {
    board.find_piece_at(to).is_none_or(|p| p.color != color)
}

pub fn has_opponent_piece_at_target(board: &Board, color: Color, to: Square) -> bool {
    board.find_piece_at(to).is_some_and(|p| p.color != color)
}

#[cfg(test)]
#[path = "movement_tests.rs"]
mod movement_tests;
