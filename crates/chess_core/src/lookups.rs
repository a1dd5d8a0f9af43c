//! Pre-computed target tables used by move generation.
//!
//! This module contains:
//! - Knight and king target sets (constant)
//! - Rook and bishop rays per square, nearest square first
//!
//! Tables only describe geometry; occupancy is checked by the callers.

use crate::square::Square;
use crate::square_set::SquareSet;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Squares walked from a start square in one direction until the board edge.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    len: u8,
    squares: [Square; 7],
}

impl Ray {
    const EMPTY: Ray = Ray {
        len: 0,
        squares: [Square::from_index(0); 7],
    };

    #[inline(always)]
    pub fn squares(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }
}

const fn offset_targets(offsets: &[(i8, i8); 8]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut i = 0;
    while i < 64 {
        let from = Square::from_index(i as u8);
        let mut bits = 0u64;
        let mut k = 0;
        while k < 8 {
            let (df, dr) = offsets[k];
            if let Some(to) = from.offset(df, dr) {
                bits |= 1u64 << to.index();
            }
            k += 1;
        }
        table[i] = SquareSet(bits);
        i += 1;
    }
    table
}

const fn rays(directions: &[(i8, i8); 4]) -> [[Ray; 4]; 64] {
    let mut table = [[Ray::EMPTY; 4]; 64];
    let mut i = 0;
    while i < 64 {
        let from = Square::from_index(i as u8);
        let mut d = 0;
        while d < 4 {
            let (df, dr) = directions[d];
            let mut ray = Ray::EMPTY;
            let mut cur = from;
            while let Some(next) = cur.offset(df, dr) {
                ray.squares[ray.len as usize] = next;
                ray.len += 1;
                cur = next;
            }
            table[i][d] = ray;
            d += 1;
        }
        i += 1;
    }
    table
}

pub static KNIGHT_TARGETS: [SquareSet; 64] = offset_targets(&KNIGHT_OFFSETS);
pub static KING_TARGETS: [SquareSet; 64] = offset_targets(&KING_OFFSETS);
pub static ROOK_RAYS: [[Ray; 4]; 64] = rays(&ROOK_DIRECTIONS);
pub static BISHOP_RAYS: [[Ray; 4]; 64] = rays(&BISHOP_DIRECTIONS);

#[inline(always)]
pub fn knight_targets(sq: Square) -> SquareSet {
    KNIGHT_TARGETS[sq.index()]
}

#[inline(always)]
pub fn king_targets(sq: Square) -> SquareSet {
    KING_TARGETS[sq.index()]
}

#[inline(always)]
pub fn rook_rays(sq: Square) -> &'static [Ray; 4] {
    &ROOK_RAYS[sq.index()]
}

#[inline(always)]
pub fn bishop_rays(sq: Square) -> &'static [Ray; 4] {
    &BISHOP_RAYS[sq.index()]
}

#[cfg(test)]
#[path = "lookups_tests.rs"]
mod lookups_tests;
