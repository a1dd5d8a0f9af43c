//! Reversible description of one applied move.

use crate::square::Square;
use crate::types::{Move, Piece};

/// Rook relocation that accompanies a castling king move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingShift {
    pub rook_from: Square,
    pub rook_to: Square,
    /// The rook as it stood before castling.
    pub rook: Piece,
}

/// Everything needed to take a move back or replay it.
///
/// Built by the execution pipeline through [`MoveRecordBuilder`]; never edited
/// after it lands in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The mover before the move: original kind and move count.
    pub moved_piece: Piece,
    /// Captured piece and the square it stood on (differs from `to` for en passant).
    pub captured: Option<(Square, Piece)>,
    /// Piece that replaced a promoting pawn.
    pub promoted_to: Option<Piece>,
    pub castling: Option<CastlingShift>,
    pub en_passant_before: Option<Square>,
    pub en_passant_after: Option<Square>,
    pub old_halfmove_clock: u32,
    pub old_fullmove_number: u32,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The pawn that promoted, if this was a promotion.
    pub fn promoted_from(&self) -> Option<Piece> {
        self.promoted_to.map(|_| self.moved_piece)
    }

    pub fn mover_old_move_count(&self) -> u16 {
        self.moved_piece.move_count
    }

    /// Piece standing on `to` once the move is applied.
    pub fn placed_piece(&self) -> Piece {
        self.promoted_to.unwrap_or(Piece {
            move_count: self.moved_piece.move_count + 1,
            ..self.moved_piece
        })
    }

    pub fn to_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            piece: self.moved_piece.kind,
            promotion: self.promoted_to.map(|p| p.kind),
        }
    }
}

/// Collects record fields while a handler applies a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecordBuilder {
    record: MoveRecord,
}

impl MoveRecordBuilder {
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: Piece,
        en_passant_before: Option<Square>,
        old_halfmove_clock: u32,
        old_fullmove_number: u32,
    ) -> Self {
        Self {
            record: MoveRecord {
                from,
                to,
                moved_piece,
                captured: None,
                promoted_to: None,
                castling: None,
                en_passant_before,
                en_passant_after: None,
                old_halfmove_clock,
                old_fullmove_number,
            },
        }
    }

    pub fn captured(&mut self, square: Square, piece: Piece) -> &mut Self {
        self.record.captured = Some((square, piece));
        self
    }

    pub fn promoted_to(&mut self, piece: Piece) -> &mut Self {
        self.record.promoted_to = Some(piece);
        self
    }

    pub fn castling(&mut self, shift: CastlingShift) -> &mut Self {
        self.record.castling = Some(shift);
        self
    }

    pub fn en_passant_after(&mut self, square: Option<Square>) -> &mut Self {
        self.record.en_passant_after = square;
        self
    }

    /// The record as filled so far.
    pub fn peek(&self) -> &MoveRecord {
        &self.record
    }

    pub fn build(self) -> MoveRecord {
        self.record
    }
}
