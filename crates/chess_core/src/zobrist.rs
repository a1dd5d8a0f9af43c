//! Zobrist hashing for board positions.
//!
//! The board XORs keys in and out as pieces are placed and lifted, so hashing
//! costs O(1) per move. The key set covers:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Black to move (1 value)
//!
//! Castling rights and the en-passant square are not part of the hash, so two
//! positions differing only in those collide. Repetition counting and the
//! transposition table both accept that.

use crate::board::Board;
use crate::square::Square;
use crate::types::{Color, Piece};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed so hashes are stable across runs.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in while Black is to move
    pub black_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        ZobristKeys {
            pieces,
            black_to_move: state,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hash of `board` recomputed from scratch. Matches [`Board::hash`] whenever
/// the incremental updates are correct.
pub fn compute_hash(board: &Board) -> u64 {
    let mut hash = 0;
    for (sq, piece) in board.pieces() {
        hash ^= ZOBRIST.piece_key(piece, sq);
    }
    if board.turn() == Color::Black {
        hash ^= ZOBRIST.black_to_move;
    }
    hash
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
