use super::*;
use crate::square::*;

#[test]
fn test_startpos_round_trip() {
    let board = Board::from_fen(START_FEN).unwrap();
    assert_eq!(board.to_fen(), START_FEN);
    assert_eq!(board.hash(), Board::startpos().hash());
    assert_eq!(Board::startpos().to_fen(), START_FEN);
}

#[test]
fn test_fen_fields_preserved() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 12",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 40",
    ] {
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
    }
}

#[test]
fn test_optional_counters() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);
    assert_eq!(board.turn(), Color::Black);
}

#[test]
fn test_castling_rights_become_move_counts() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
    assert!(!board.piece_at(E1).has_moved());
    assert!(!board.piece_at(H1).has_moved());
    assert!(board.piece_at(A1).has_moved());
    assert!(!board.piece_at(A8).has_moved());
    assert!(board.piece_at(H8).has_moved());

    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(board.piece_at(E1).has_moved());
    assert!(board.piece_at(E8).has_moved());
}

#[test]
fn test_pawns_off_start_rank_have_moved() {
    let board = Board::from_fen("4k3/3p4/8/8/4P3/8/3P4/4K3 w - - 0 1").unwrap();
    assert!(board.piece_at(E4).has_moved());
    assert!(!board.piece_at(D2).has_moved());
    assert!(!board.piece_at(D7).has_moved());
}

#[test]
fn test_fen_errors() {
    assert_eq!(
        Board::from_fen("8/8/8 w - -").unwrap_err(),
        FenError::RankCount(3)
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap_err(),
        FenError::MissingFields(2)
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - -").unwrap_err(),
        FenError::SideToMove("x".to_string())
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4X3 w - -").unwrap_err(),
        FenError::Piece('X')
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K2 w - -").unwrap_err(),
        FenError::FileCount { rank: 1, files: 7 }
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/4K3 w - -").unwrap_err(),
        FenError::KingCount(Color::Black)
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w X -").unwrap_err(),
        FenError::Castling('X')
    );
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9").unwrap_err(),
        FenError::EnPassant(_)
    ));
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").unwrap_err(),
        FenError::Counter("x".to_string())
    );
}
