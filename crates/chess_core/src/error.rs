//! Errors for text input the core parses.
//!
//! Illegal moves are not errors: the move API answers them with `false`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("expected a square like \"e4\", got {0:?}")]
    Length(String),
    #[error("invalid file {0:?}")]
    File(char),
    #[error("invalid rank {0:?}")]
    Rank(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in the board section, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    FileCount { rank: i8, files: i8 },
    #[error("invalid piece character {0:?}")]
    Piece(char),
    #[error("invalid side to move {0:?}")]
    SideToMove(String),
    #[error("invalid castling character {0:?}")]
    Castling(char),
    #[error("invalid en passant square: {0}")]
    EnPassant(#[from] SquareParseError),
    #[error("invalid move counter {0:?}")]
    Counter(String),
    #[error("{0:?} must have exactly one king")]
    KingCount(crate::types::Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("expected \"startpos\" or \"fen\", got {0:?}")]
    Position(String),
    #[error("illegal move {0:?}")]
    IllegalMove(String),
}
