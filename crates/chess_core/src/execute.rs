//! Move execution pipeline.
//!
//! Handlers are tried in [`PIPELINE`] order and the first whose `can_handle`
//! accepts the move applies it. A handler mutates occupancy, fills the
//! [`MoveRecordBuilder`], closes the turn and returns the primary event.
//! Callers validate legality before executing; handlers only re-check what
//! they must before touching the board.

use crate::board::Board;
use crate::events::BoardEvent;
use crate::movement::{has_opponent_piece_at_target, no_piece_at_target};
use crate::record::{CastlingShift, MoveRecord, MoveRecordBuilder};
use crate::rules;
use crate::square::Square;
use crate::types::{Piece, PieceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    Promotion,
    Castling,
    EnPassant,
    Capture,
    Normal,
}

pub const PIPELINE: [Handler; 5] = [
    Handler::Promotion,
    Handler::Castling,
    Handler::EnPassant,
    Handler::Capture,
    Handler::Normal,
];

pub(crate) enum Outcome {
    Complete {
        record: MoveRecord,
        event: BoardEvent,
    },
    /// Pawn sits on the last rank; the builder waits for a piece choice.
    AwaitingPromotion {
        pending: MoveRecordBuilder,
        event: BoardEvent,
    },
}

impl Handler {
    pub fn can_handle(self, board: &Board, piece: Piece, from: Square, to: Square) -> bool {
        match self {
            Handler::Promotion => {
                piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
            }
            Handler::Castling => rules::is_castling(board, piece, from, to),
            Handler::EnPassant => rules::is_en_passant(board, piece, from, to),
            Handler::Capture => has_opponent_piece_at_target(board, piece.color, to),
            Handler::Normal => no_piece_at_target(board, to),
        }
    }

    /// Applies the move. `None` means the handler refused before mutating.
    fn handle(
        self,
        board: &mut Board,
        piece: Piece,
        from: Square,
        to: Square,
        record: &mut MoveRecordBuilder,
    ) -> Option<BoardEvent> {
        match self {
            Handler::Promotion => {
                if let Some(captured) = board.find_piece_at(to) {
                    if captured.color == piece.color {
                        return None;
                    }
                    board.take(to);
                    record.captured(to, captured);
                }
                let pawn = board.relocate(from, to);
                Some(BoardEvent::PromotionRequest { from, to, pawn })
            }
            Handler::Castling => {
                if !board.castling_path_is_safe(from, to) {
                    return None;
                }
                let (rook_from, rook_to) = rules::castling_rook_squares(piece.color, to);
                let rook = board.find_piece_at(rook_from)?;
                board.relocate(from, to);
                board.relocate(rook_from, rook_to);
                record.castling(CastlingShift {
                    rook_from,
                    rook_to,
                    rook,
                });
                close_turn(board, record, None, false);
                Some(BoardEvent::Castle {
                    color: piece.color,
                    king_from: from,
                    king_to: to,
                    rook_from,
                    rook_to,
                })
            }
            Handler::EnPassant => {
                let victim = rules::en_passant_victim_square(from, to);
                Some(capture(board, from, to, victim, record))
            }
            Handler::Capture => Some(capture(board, from, to, to, record)),
            Handler::Normal => {
                let moved = board.relocate(from, to);
                let double_step = piece.kind == PieceKind::Pawn
                    && (to.rank() - from.rank()).abs() == 2;
                let en_passant = if double_step {
                    from.offset(0, piece.color.forward())
                } else {
                    None
                };
                close_turn(board, record, en_passant, piece.kind == PieceKind::Pawn);
                Some(BoardEvent::Move {
                    from,
                    to,
                    piece: moved,
                })
            }
        }
    }
}

fn capture(
    board: &mut Board,
    from: Square,
    to: Square,
    captured_on: Square,
    record: &mut MoveRecordBuilder,
) -> BoardEvent {
    let captured = board.take(captured_on);
    record.captured(captured_on, captured);
    let piece = board.relocate(from, to);
    close_turn(board, record, None, true);
    BoardEvent::Capture {
        from,
        to,
        piece,
        captured,
        captured_on,
    }
}

fn close_turn(
    board: &mut Board,
    record: &mut MoveRecordBuilder,
    en_passant: Option<Square>,
    reset_clock: bool,
) {
    record.en_passant_after(en_passant);
    board.finish_turn(en_passant, reset_clock);
}

/// Runs the pipeline for a move the caller already validated.
pub(crate) fn execute(board: &mut Board, from: Square, to: Square) -> Option<Outcome> {
    let piece = board.find_piece_at(from)?;
    let handler = PIPELINE
        .into_iter()
        .find(|h| h.can_handle(board, piece, from, to))?;
    let mut record = MoveRecordBuilder::new(
        from,
        to,
        piece,
        board.en_passant(),
        board.halfmove_clock(),
        board.fullmove_number(),
    );
    let event = handler.handle(board, piece, from, to, &mut record)?;
    if handler == Handler::Promotion {
        return Some(Outcome::AwaitingPromotion {
            pending: record,
            event,
        });
    }
    Some(Outcome::Complete {
        record: record.build(),
        event,
    })
}

/// Second promotion phase: swap the pawn for `kind` and close the turn.
///
/// # Panics
/// If `kind` is not a knight, bishop, rook or queen.
pub(crate) fn finish_promotion(
    board: &mut Board,
    mut pending: MoveRecordBuilder,
    kind: PieceKind,
) -> (MoveRecord, BoardEvent) {
    assert!(kind.is_promotion_target(), "cannot promote to {kind:?}");
    let square = pending.peek().to;
    let pawn = board.take(square);
    let promoted = Piece { kind, ..pawn };
    board.put(square, promoted);
    pending.promoted_to(promoted);
    close_turn(board, &mut pending, None, true);
    (pending.build(), BoardEvent::Promotion { square, promoted })
}

/// Puts a parked promotion back: pawn home, captured piece restored.
pub(crate) fn cancel_promotion(board: &mut Board, pending: MoveRecordBuilder) {
    let record = pending.build();
    board.take(record.to);
    board.put(record.from, record.moved_piece);
    if let Some((square, piece)) = record.captured {
        board.put(square, piece);
    }
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod execute_tests;
