use std::fmt;
use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashMap;

use crate::events::{BoardEvent, EventBus, Listener, SubscriptionId};
use crate::execute::{self, Outcome};
use crate::history::History;
use crate::movegen;
use crate::record::{MoveRecord, MoveRecordBuilder};
use crate::rules;
use crate::square::Square;
use crate::square_set::SquareSet;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Full game state: placement, side to move, clocks, history and listeners.
///
/// The square map and the per-color sets always agree, and each color has
/// exactly one king. `hash` is kept in step by `put`/`take`/turn changes.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) by_color: [SquareSet; 2],
    pub(crate) kings: [Option<Square>; 2],
    pub(crate) turn: Color,
    pub(crate) en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    /// How often each position hash occurred in the game so far.
    pub(crate) seen: FxHashMap<u64, u32>,
    pub(crate) history: History,
    pub(crate) pending_promotion: Option<MoveRecordBuilder>,
    pub(crate) events: EventBus,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// No pieces, White to move. Callers place pieces and then call
    /// [`Board::reset_repetitions`].
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            by_color: [SquareSet::EMPTY; 2],
            kings: [None; 2],
            turn: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            seen: FxHashMap::default(),
            history: History::new(),
            pending_promotion: None,
            events: EventBus::default(),
        }
    }

    pub fn startpos() -> Self {
        let mut board = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            board.put(Square::from_index(f), Piece::new(Color::White, kind));
            board.put(Square::from_index(8 + f), Piece::new(Color::White, PieceKind::Pawn));
            board.put(Square::from_index(48 + f), Piece::new(Color::Black, PieceKind::Pawn));
            board.put(Square::from_index(56 + f), Piece::new(Color::Black, kind));
        }
        board.reset_repetitions();
        board
    }

    /// Forgets earlier positions; the current one counts as seen once.
    pub(crate) fn reset_repetitions(&mut self) {
        self.seen.clear();
        self.seen.insert(self.hash, 1);
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Incrementally maintained Zobrist hash.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// `(from, to)` of a promotion waiting for [`Board::promote`].
    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
            .as_ref()
            .map(|p| (p.peek().from, p.peek().to))
    }

    pub fn find_piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// # Panics
    /// If `sq` is empty.
    pub fn piece_at(&self, sq: Square) -> Piece {
        match self.squares[sq.index()] {
            Some(piece) => piece,
            None => panic!("no piece on {sq}"),
        }
    }

    /// Occupied squares in index order, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.find_piece_at(sq).map(|p| (sq, p)))
    }

    pub fn occupancy(&self, color: Color) -> SquareSet {
        self.by_color[color.idx()]
    }

    /// # Panics
    /// If `color` has no king, which breaks a board invariant.
    pub fn king_square(&self, color: Color) -> Square {
        match self.kings[color.idx()] {
            Some(sq) => sq,
            None => panic!("{color:?} king not found"),
        }
    }

    /// Occurrences of the current position in this game, itself included.
    pub fn repetition_count(&self) -> u32 {
        self.seen.get(&self.hash).copied().unwrap_or(0)
    }

    // ---------------------------------------------------------------------
    // Occupancy primitives. Every placement change goes through these so the
    // square map, color sets, king squares and hash stay in agreement.
    // ---------------------------------------------------------------------

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "{sq} is occupied");
        self.squares[sq.index()] = Some(piece);
        self.by_color[piece.color.idx()].insert(sq);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.idx()] = Some(sq);
        }
        self.hash ^= ZOBRIST.piece_key(piece, sq);
    }

    pub(crate) fn take(&mut self, sq: Square) -> Piece {
        let Some(piece) = self.squares[sq.index()].take() else {
            panic!("no piece on {sq}");
        };
        self.by_color[piece.color.idx()].remove(sq);
        if piece.kind == PieceKind::King && self.kings[piece.color.idx()] == Some(sq) {
            self.kings[piece.color.idx()] = None;
        }
        self.hash ^= ZOBRIST.piece_key(piece, sq);
        piece
    }

    /// Moves the piece on `from` to the empty `to` and counts the move.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Piece {
        let mut piece = self.take(from);
        piece.move_count += 1;
        self.put(to, piece);
        piece
    }

    fn toggle_turn(&mut self) {
        self.turn = self.turn.other();
        self.hash ^= ZOBRIST.black_to_move;
    }

    /// Closes the mover's turn after occupancy changed.
    pub(crate) fn finish_turn(&mut self, en_passant: Option<Square>, reset_clock: bool) {
        self.en_passant = en_passant;
        self.halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.turn == Color::Black {
            self.fullmove_number += 1;
        }
        self.toggle_turn();
        *self.seen.entry(self.hash).or_insert(0) += 1;
    }

    // ---------------------------------------------------------------------
    // Check detection and legality
    // ---------------------------------------------------------------------

    /// True if any opposing piece reaches `color`'s king.
    ///
    /// # Panics
    /// If `color` has no king.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        let king = self.king_square(color);
        self.occupancy(color.other())
            .iter()
            .any(|sq| rules::reaches(self, self.piece_at(sq), sq, king))
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.is_king_in_check(color)
    }

    /// Whether moving the piece on `from` to `to` is legal and leaves its own
    /// king safe. Does not look at whose turn it is.
    ///
    /// The move is tried on the board and rolled back before returning.
    pub fn is_piece_movement_avoiding_check(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.find_piece_at(from) else {
            return false;
        };
        if !rules::is_valid_move(self, from, to) {
            return false;
        }
        if self
            .find_piece_at(to)
            .is_some_and(|p| p.kind == PieceKind::King)
        {
            return false;
        }
        let captured_on = if rules::is_en_passant(self, piece, from, to) {
            Some(rules::en_passant_victim_square(from, to))
        } else if rules::is_castling(self, piece, from, to) {
            if !self.castling_path_is_safe(from, to) {
                return false;
            }
            None
        } else {
            self.find_piece_at(to).map(|_| to)
        };

        let trial = Simulation::new(self, from, to, captured_on);
        !trial.is_king_in_check(piece.color)
    }

    /// The square a castling king crosses must not be attacked.
    pub(crate) fn castling_path_is_safe(&mut self, from: Square, to: Square) -> bool {
        let color = self.piece_at(from).color;
        let Some(crossed) = from.offset((to.file() - from.file()).signum(), 0) else {
            return false;
        };
        let trial = Simulation::new(self, from, crossed, None);
        !trial.is_king_in_check(color)
    }

    fn is_legal_for_turn(&mut self, from: Square, to: Square) -> bool {
        self.find_piece_at(from)
            .is_some_and(|p| p.color == self.turn)
            && self.is_piece_movement_avoiding_check(from, to)
    }

    /// Legal destinations of the piece on `from`, whichever color it is.
    pub fn legal_moves_from(&mut self, from: Square) -> Vec<Square> {
        movegen::legal_destinations(self, from)
    }

    /// Legal moves for the side to move; pawn moves onto the last rank expand
    /// into one move per promotion piece.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_king_in_check(color) && !movegen::has_legal_move(self, color)
    }

    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_king_in_check(color) && !movegen::has_legal_move(self, color)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Neither side can mate: bare kings, a single minor piece, or only
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishops = 0;
        let mut bishop_shades = [false; 2];
        for (sq, piece) in self.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    bishop_shades[((sq.file() + sq.rank()) % 2) as usize] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        knights + bishops <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }

    /// Fifty-move rule, threefold repetition or insufficient material.
    /// Stalemate is reported separately by [`Board::is_stalemate`].
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_threefold_repetition() || self.is_insufficient_material()
    }

    // ---------------------------------------------------------------------
    // User moves: validated, recorded in history, published to listeners
    // ---------------------------------------------------------------------

    /// Plays a move for the side to move. Returns false, changing nothing, if
    /// the move is illegal or a promotion is still waiting for its piece.
    ///
    /// Publishes one of Move, Capture, Castle or PromotionRequest, followed by
    /// TurnChanged unless the move waits for a promotion choice.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        if self.pending_promotion.is_some() || !self.is_legal_for_turn(from, to) {
            return false;
        }
        match execute::execute(self, from, to) {
            Some(Outcome::Complete { record, event }) => {
                self.history.push(record);
                self.publish(&event);
                self.publish(&BoardEvent::TurnChanged { turn: self.turn });
                true
            }
            Some(Outcome::AwaitingPromotion { pending, event }) => {
                self.pending_promotion = Some(pending);
                self.publish(&event);
                true
            }
            None => false,
        }
    }

    /// Completes the pending promotion `from -> to` with `kind`.
    /// Returns false if no such promotion is pending.
    ///
    /// # Panics
    /// If `kind` is a pawn or a king.
    pub fn promote(&mut self, from: Square, to: Square, kind: PieceKind) -> bool {
        assert!(kind.is_promotion_target(), "cannot promote to {kind:?}");
        if self.pending_promotion() != Some((from, to)) {
            return false;
        }
        let Some(pending) = self.pending_promotion.take() else {
            return false;
        };
        let (record, event) = execute::finish_promotion(self, pending, kind);
        self.history.push(record);
        self.publish(&event);
        self.publish(&BoardEvent::TurnChanged { turn: self.turn });
        true
    }

    /// Takes back the last move, or withdraws a pending promotion.
    pub fn undo(&mut self) -> bool {
        if let Some(pending) = self.pending_promotion.take() {
            execute::cancel_promotion(self, pending);
            return true;
        }
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.revert(&record);
        self.history.push_redo(record);
        self.publish(&BoardEvent::TurnChanged { turn: self.turn });
        true
    }

    /// Replays the most recently undone move.
    pub fn redo(&mut self) -> bool {
        if self.pending_promotion.is_some() {
            return false;
        }
        let Some(record) = self.history.pop_redo() else {
            return false;
        };
        self.replay(&record);
        self.history.push_preserving_redo(record);
        self.publish(&BoardEvent::TurnChanged { turn: self.turn });
        true
    }

    // ---------------------------------------------------------------------
    // Search moves: validated, silent, redo branch untouched
    // ---------------------------------------------------------------------

    /// Applies `mv` for the side to move. A pawn reaching the last rank
    /// becomes `mv.promotion`, or a queen when none is given.
    pub fn make_move(&mut self, mv: Move) -> bool {
        if self.pending_promotion.is_some() || !self.is_legal_for_turn(mv.from, mv.to) {
            return false;
        }
        let record = match execute::execute(self, mv.from, mv.to) {
            Some(Outcome::Complete { record, .. }) => record,
            Some(Outcome::AwaitingPromotion { pending, .. }) => {
                let kind = mv.promotion.unwrap_or(PieceKind::Queen);
                execute::finish_promotion(self, pending, kind).0
            }
            None => return false,
        };
        self.history.push_preserving_redo(record);
        true
    }

    /// Takes back the last applied move without touching the redo branch.
    pub fn unmake_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.revert(&record);
        true
    }

    /// Applies `mv` and returns a guard that unmakes it when dropped.
    pub fn apply(&mut self, mv: Move) -> Option<AppliedMove<'_>> {
        if self.make_move(mv) {
            Some(AppliedMove { board: self })
        } else {
            None
        }
    }

    fn revert(&mut self, record: &MoveRecord) {
        if let Some(count) = self.seen.get_mut(&self.hash) {
            *count -= 1;
            if *count == 0 {
                self.seen.remove(&self.hash);
            }
        }
        self.toggle_turn();
        if let Some(shift) = record.castling {
            self.take(shift.rook_to);
            self.put(shift.rook_from, shift.rook);
        }
        self.take(record.to);
        self.put(record.from, record.moved_piece);
        if let Some((sq, piece)) = record.captured {
            self.put(sq, piece);
        }
        self.en_passant = record.en_passant_before;
        self.halfmove_clock = record.old_halfmove_clock;
        self.fullmove_number = record.old_fullmove_number;
    }

    fn replay(&mut self, record: &MoveRecord) {
        if let Some((sq, _)) = record.captured {
            self.take(sq);
        }
        self.take(record.from);
        self.put(record.to, record.placed_piece());
        if let Some(shift) = record.castling {
            self.relocate(shift.rook_from, shift.rook_to);
        }
        let reset = record.moved_piece.kind == PieceKind::Pawn || record.is_capture();
        self.finish_turn(record.en_passant_after, reset);
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(&BoardEvent) + Send + 'static) -> SubscriptionId {
        let listener: Listener = Box::new(listener);
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn publish(&mut self, event: &BoardEvent) {
        self.events.publish(event);
    }
}

/// A move tried on the board, taken back when the guard drops.
struct Simulation<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    captured: Option<(Square, Piece)>,
}

impl<'a> Simulation<'a> {
    fn new(board: &'a mut Board, from: Square, to: Square, captured_on: Option<Square>) -> Self {
        let captured = captured_on.map(|sq| (sq, board.take(sq)));
        let mover = board.take(from);
        board.put(to, mover);
        Simulation {
            board,
            from,
            to,
            captured,
        }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        let mover = self.board.take(self.to);
        self.board.put(self.from, mover);
        if let Some((sq, piece)) = self.captured.take() {
            self.board.put(sq, piece);
        }
    }
}

/// Guard returned by [`Board::apply`]; derefs to the board in the child
/// position and unmakes the move on drop.
pub struct AppliedMove<'a> {
    board: &'a mut Board,
}

impl Deref for AppliedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.board.unmake_move();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for column in 0..8 {
                let c = Square::from_row_column(row, column)
                    .and_then(|sq| self.find_piece_at(sq))
                    .map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
