//! Applied-move and redo stacks.

use crate::record::MoveRecord;

#[derive(Clone, Debug, Default)]
pub struct History {
    applied: Vec<MoveRecord>,
    redo: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new move. A fresh move invalidates the redo branch.
    pub fn push(&mut self, record: MoveRecord) {
        self.applied.push(record);
        self.redo.clear();
    }

    /// Records a move without disturbing the redo branch. Search and redo use this.
    pub fn push_preserving_redo(&mut self, record: MoveRecord) {
        self.applied.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.applied.pop()
    }

    pub fn push_redo(&mut self, record: MoveRecord) {
        self.redo.push(record);
    }

    pub fn pop_redo(&mut self) -> Option<MoveRecord> {
        self.redo.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.applied.last()
    }

    /// Applied moves, oldest first.
    pub fn applied(&self) -> &[MoveRecord] {
        &self.applied
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MoveRecordBuilder;
    use crate::square::*;
    use crate::types::{Color, Piece, PieceKind};

    fn record(from: Square, to: Square) -> MoveRecord {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        MoveRecordBuilder::new(from, to, pawn, None, 0, 1).build()
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        history.push(record(E2, E4));
        let undone = history.pop().unwrap();
        history.push_redo(undone);
        assert!(history.can_redo());

        history.push(record(D2, D4));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_push_preserving_redo() {
        let mut history = History::new();
        history.push(record(E2, E4));
        let undone = history.pop().unwrap();
        history.push_redo(undone);

        history.push_preserving_redo(record(D2, D4));
        assert_eq!(history.pop().map(|r| r.to), Some(D4));
        assert_eq!(history.pop_redo().map(|r| r.to), Some(E4));
    }
}
