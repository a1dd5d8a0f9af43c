//! Notifications the board publishes for user-driven moves.
//!
//! Moves made by search (`Board::make_move`) publish nothing.

use std::fmt;

use crate::square::Square;
use crate::types::{Color, Piece};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    Move {
        from: Square,
        to: Square,
        piece: Piece,
    },
    Capture {
        from: Square,
        to: Square,
        piece: Piece,
        captured: Piece,
        /// Differs from `to` for en passant.
        captured_on: Square,
    },
    Castle {
        color: Color,
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// A pawn reached the last rank; the move completes with `Board::promote`.
    PromotionRequest {
        from: Square,
        to: Square,
        pawn: Piece,
    },
    Promotion {
        square: Square,
        promoted: Piece,
    },
    TurnChanged {
        turn: Color,
    },
}

pub type Listener = Box<dyn FnMut(&BoardEvent) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Delivers to listeners in subscription order.
    pub fn publish(&mut self, event: &BoardEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// A cloned board starts without listeners.
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
