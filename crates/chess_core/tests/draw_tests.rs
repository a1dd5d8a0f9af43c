//! Tests for draw and game-end detection
//!
//! This module tests:
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Insufficient material
//! - Checkmate vs stalemate vs plain check

use chess_core::square::*;
use chess_core::{Board, Color};

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let mut b = board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(b.legal_moves().is_empty(), "Stalemate position should have no legal moves");
    assert!(!b.is_check(Color::Black), "Stalemate means king is not in check");
    assert!(b.is_stalemate(Color::Black));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king on g6, white pawn on g7, black king on g8
    let mut b = board("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(b.legal_moves().is_empty());
    assert!(b.is_stalemate(Color::Black));
    assert!(!b.is_draw(), "stalemate is reported on its own");
}

// =============================================================================
// Fifty-Move Rule Tests
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let b = board("8/8/8/4k3/8/4K3/8/R7 w - - 100 60");
    assert!(b.is_fifty_move_draw(), "halfmove_clock=100 should be a draw");
    assert!(b.is_draw());
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let b = board("8/8/8/4k3/8/4K3/8/R7 w - - 99 60");
    assert!(!b.is_fifty_move_draw(), "halfmove_clock=99 should not be a draw yet");
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut b = board("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    assert!(b.move_piece(E2, E4));
    assert_eq!(b.halfmove_clock(), 0);
    assert!(!b.is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_reset_on_capture() {
    let mut b = board("8/8/8/4k3/8/3K4/8/r6R w - - 99 60");
    assert!(b.move_piece(H1, A1));
    assert_eq!(b.halfmove_clock(), 0);
}

// =============================================================================
// Insufficient Material Tests
// =============================================================================

#[test]
fn test_insufficient_material_king_vs_king() {
    assert!(board("8/8/8/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_insufficient_material_single_minor() {
    assert!(board("8/8/8/4k3/8/4KB2/8/8 w - - 0 1").is_insufficient_material());
    assert!(board("8/8/8/4k3/8/4KN2/8/8 w - - 0 1").is_insufficient_material());
    assert!(board("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
    assert!(board("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_insufficient_material_same_color_bishops() {
    // f8 and c1 are both dark squares
    assert!(board("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_sufficient_material() {
    for fen in [
        // Opposite-colored bishops
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ] {
        assert!(!board(fen).is_insufficient_material(), "{fen}");
    }
}

// =============================================================================
// Repetition Tests
// =============================================================================

#[test]
fn test_position_hash_same_position() {
    let a = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5");
    assert_eq!(a.hash(), b.hash(), "clocks are not part of the hash");
}

#[test]
fn test_position_hash_different_side_to_move() {
    let a = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let b = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn test_position_hash_ignores_castling_and_en_passant() {
    let a = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let b = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1");
    assert_eq!(a.hash(), b.hash());

    let a = board("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let b = board("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn test_threefold_repetition_detection() {
    let mut b = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    for _ in 0..2 {
        for (from, to) in [(F3, G1), (C6, B8), (G1, F3), (B8, C6)] {
            assert!(!b.is_threefold_repetition());
            assert!(b.move_piece(from, to));
        }
    }
    assert_eq!(b.repetition_count(), 3);
    assert!(b.is_threefold_repetition());
    assert!(b.is_draw());
}

// =============================================================================
// Checkmate vs check
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate
    let mut b = board("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(b.is_checkmate(Color::Black));
    assert!(!b.is_stalemate(Color::Black));
}

#[test]
fn test_check_is_not_checkmate() {
    let mut b = board("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(b.is_check(Color::Black));
    assert!(!b.is_checkmate(Color::Black));
}
