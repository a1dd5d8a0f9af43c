//! Forsyth-Edwards Notation, used by tests and UCI setup.
//!
//! The board has no castling-rights field: rights are the move counts of the
//! king and rooks. Loading maps each missing right onto a "moved" rook (or
//! king), and writing derives the letters back from unmoved pieces.

use crate::board::Board;
use crate::error::FenError;
use crate::square::Square;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rook home files with their castling letter, kingside first.
const CASTLING_SIDES: [(i8, char); 2] = [(7, 'k'), (0, 'q')];

impl Board {
    /// Parses a FEN string. The half-move and full-move fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        board.turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        for color in Color::ALL {
            let kings = board
                .pieces()
                .filter(|(_, p)| p.is(color, PieceKind::King))
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color));
            }
        }

        apply_castling_rights(&mut board, parts[2])?;

        board.en_passant = match parts[3] {
            "-" => None,
            text => Some(text.parse::<Square>()?),
        };

        let counter = |text: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match text {
                Some(t) => t.parse().map_err(|_| FenError::Counter(t.to_string())),
                None => Ok(default),
            }
        };
        board.halfmove_clock = counter(parts.get(4), 0)?;
        board.fullmove_number = counter(parts.get(5), 1)?;

        // Side to move is part of the hash; placement was hashed by `put`.
        if board.turn == Color::Black {
            board.hash ^= crate::zobrist::ZOBRIST.black_to_move;
        }
        board.reset_repetitions();
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for row in 0..8 {
            let mut empty = 0;
            for column in 0..8 {
                match Square::from_row_column(row, column).and_then(|sq| self.find_piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = castling_rights(self);
        if rights.is_empty() {
            fen.push('-');
        } else {
            fen.push_str(&rights);
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 8 - rank_idx as i8; // FEN lists rank 8 .. 1
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as i8;
            } else {
                let kind = PieceKind::from_letter(ch).ok_or(FenError::Piece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(file, rank).ok_or(FenError::FileCount { rank, files: file + 1 })?;
                let mut piece = Piece::new(color, kind);
                if !is_home_square(piece, sq) {
                    piece.move_count = 1;
                }
                board.put(sq, piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::FileCount { rank, files: file });
        }
    }
    Ok(())
}

/// Pieces away from these squares have certainly moved. Only pawns, kings and
/// rooks carry rules that depend on it.
fn is_home_square(piece: Piece, sq: Square) -> bool {
    let back = piece.color.back_rank();
    match piece.kind {
        PieceKind::Pawn => sq.rank() == piece.color.pawn_rank(),
        PieceKind::King => sq.rank() == back && sq.file() == 4,
        PieceKind::Rook => sq.rank() == back && (sq.file() == 0 || sq.file() == 7),
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
    }
}

fn home(color: Color, file: i8) -> Square {
    Square::from_index(((color.back_rank() - 1) * 8 + file) as u8)
}

/// Marks the rook (and, with no rights left, the king) as moved for every
/// castling letter absent from `field`.
fn apply_castling_rights(board: &mut Board, field: &str) -> Result<(), FenError> {
    let mut rights = [[false; 2]; 2];
    if field != "-" {
        for c in field.chars() {
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let side = CASTLING_SIDES
                .iter()
                .position(|&(_, letter)| letter == c.to_ascii_lowercase())
                .ok_or(FenError::Castling(c))?;
            rights[color.idx()][side] = true;
        }
    }

    for color in Color::ALL {
        for (side, &(file, _)) in CASTLING_SIDES.iter().enumerate() {
            if !rights[color.idx()][side] {
                mark_moved(board, home(color, file), color, PieceKind::Rook);
            }
        }
        if !rights[color.idx()].contains(&true) {
            mark_moved(board, home(color, 4), color, PieceKind::King);
        }
    }
    Ok(())
}

fn mark_moved(board: &mut Board, sq: Square, color: Color, kind: PieceKind) {
    if let Some(mut piece) = board.find_piece_at(sq)
        && piece.is(color, kind)
        && !piece.has_moved()
    {
        board.take(sq);
        piece.move_count = 1;
        board.put(sq, piece);
    }
}

fn castling_rights(board: &Board) -> String {
    let mut rights = String::new();
    for color in Color::ALL {
        let king_ready = board
            .find_piece_at(home(color, 4))
            .is_some_and(|p| p.is(color, PieceKind::King) && !p.has_moved());
        if !king_ready {
            continue;
        }
        for &(file, letter) in &CASTLING_SIDES {
            let rook_ready = board
                .find_piece_at(home(color, file))
                .is_some_and(|p| p.is(color, PieceKind::Rook) && !p.has_moved());
            if rook_ready {
                rights.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }
    rights
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
