pub mod board;
pub mod error;
pub mod events;
pub mod execute;
pub mod fen;
pub mod history;
pub mod lookups;
pub mod movegen;
pub mod movement;
pub mod perft;
pub mod record;
pub mod rules;
pub mod square;
pub mod square_set;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use events::{BoardEvent, SubscriptionId};
pub use fen::START_FEN;
pub use history::History;
pub use movegen::*;
pub use perft::{divide, perft};
pub use record::{CastlingShift, MoveRecord};
pub use square::Square;
pub use square_set::SquareSet;
pub use types::*;
pub use uci::*;
pub use zobrist::{compute_hash, ZOBRIST};

// =============================================================================
// Engine trait, implemented by the search engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation in pawns, positive favoring White
    pub score: f32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
}

/// Trait that chess engines implement.
pub trait Engine: Send {
    /// Search the position to the given depth.
    ///
    /// The board is handed back in the state it was passed in.
    fn search(&mut self, board: &mut Board, depth: u8) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game (clear hash tables, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
