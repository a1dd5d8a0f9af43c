//! Move ordering: promotions, then captures by MVV-LVA, then quiet moves.

use std::cmp::Reverse;

use chess_core::rules;
use chess_core::{Board, Move, PieceKind};

const PROMOTION_BONUS: i32 = 900;

/// Higher is searched first.
pub fn score_move(board: &Board, mv: Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = board.find_piece_at(mv.to) {
        score += 10 * victim.kind.value() - mv.piece.value();
    } else if is_en_passant(board, mv) {
        score += 10 * PieceKind::Pawn.value() - PieceKind::Pawn.value();
    }
    if let Some(kind) = mv.promotion {
        score += PROMOTION_BONUS + kind.value();
    }
    score
}

/// Stable, so equally scored moves keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(board, mv)));
}

pub fn is_tactical(board: &Board, mv: Move) -> bool {
    board.find_piece_at(mv.to).is_some() || is_en_passant(board, mv) || mv.promotion.is_some()
}

/// Captures and queen promotions, in search order. Under-promotions are left
/// to the main search.
pub fn tactical_moves(board: &Board, moves: &[Move]) -> Vec<Move> {
    let mut tactical: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&mv| {
            is_tactical(board, mv) && mv.promotion.is_none_or(|k| k == PieceKind::Queen)
        })
        .collect();
    order_moves(board, &mut tactical);
    tactical
}

fn is_en_passant(board: &Board, mv: Move) -> bool {
    board
        .find_piece_at(mv.from)
        .is_some_and(|pawn| rules::is_en_passant(board, pawn, mv.from, mv.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::square::*;

    #[test]
    fn test_mvv_lva() {
        // White pawn and queen can both take the black queen on d5; a rook hangs on a4
        let b = Board::from_fen("4k3/8/8/3q4/r3P3/8/8/3QK3 w - - 0 1").unwrap();
        let pawn_takes_queen = Move::new(E4, D5, PieceKind::Pawn);
        let queen_takes_queen = Move::new(D1, D5, PieceKind::Queen);
        let queen_takes_rook = Move::new(D1, A4, PieceKind::Queen);
        assert!(score_move(&b, pawn_takes_queen) > score_move(&b, queen_takes_queen));
        assert!(score_move(&b, queen_takes_queen) > score_move(&b, queen_takes_rook));
        assert_eq!(score_move(&b, Move::new(E4, E5, PieceKind::Pawn)), 0);
    }

    #[test]
    fn test_promotions_first() {
        let b = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = vec![
            Move::new(E1, E2, PieceKind::King),
            Move::new(A7, A8, PieceKind::Pawn).with_promotion(PieceKind::Knight),
            Move::new(A7, B8, PieceKind::Pawn).with_promotion(PieceKind::Queen),
            Move::new(A7, A8, PieceKind::Pawn).with_promotion(PieceKind::Queen),
        ];
        order_moves(&b, &mut moves);
        assert_eq!(moves[0], Move::new(A7, B8, PieceKind::Pawn).with_promotion(PieceKind::Queen));
        assert_eq!(moves[1], Move::new(A7, A8, PieceKind::Pawn).with_promotion(PieceKind::Queen));
        assert_eq!(moves[3], Move::new(E1, E2, PieceKind::King));
    }

    #[test]
    fn test_tactical_filter() {
        let mut b = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = b.legal_moves();
        let tactical = tactical_moves(&b, &moves);
        assert_eq!(tactical, vec![Move::new(E5, D6, PieceKind::Pawn)]);
        assert_eq!(score_move(&b, Move::new(E5, D6, PieceKind::Pawn)), 9);
    }

    #[test]
    fn test_en_passant_only_for_side_to_move() {
        // Black's c-pawn could step onto d6, but that is no capture with White to move
        let b = Board::from_fen("4k3/2p5/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let black_step = Move::new(C7, D6, PieceKind::Pawn);
        assert_eq!(score_move(&b, black_step), 0);
        assert!(!is_tactical(&b, black_step));
    }
}
