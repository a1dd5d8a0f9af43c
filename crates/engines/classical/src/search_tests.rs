use super::*;
use chess_core::square::*;
use chess_core::PieceKind;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn searcher(depth: u8) -> Searcher {
    let mut s = Searcher::default();
    s.set_depth(depth);
    s
}

#[test]
fn test_startpos_returns_legal_move() {
    let mut b = Board::startpos();
    let fen = b.to_fen();
    let hash = b.hash();

    let mut s = searcher(2);
    let best = s.compute_best_move(&mut b).expect("start position has moves");
    assert!(b.legal_moves().contains(&best.mv));
    assert!(s.nodes() > 0);

    assert_eq!(b.to_fen(), fen);
    assert_eq!(b.hash(), hash);
    assert!(b.history().is_empty());
}

#[test]
fn test_finds_mate_in_one_for_white() {
    let mut b = board("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let best = searcher(2).compute_best_move(&mut b).unwrap();
    assert_eq!(best.mv, Move::new(E1, E8, PieceKind::Queen));
    assert!(best.score >= MATE_BOUND);
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let mut b = board("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let best = searcher(2).compute_best_move(&mut b).unwrap();
    assert_eq!(best.mv, Move::new(E8, E1, PieceKind::Queen));
    assert!(best.score <= -MATE_BOUND);
}

#[test]
fn test_no_move_when_game_is_over() {
    // Fool's mate
    let mut b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(searcher(3).compute_best_move(&mut b).is_none());

    // Stalemate
    let mut b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(searcher(3).compute_best_move(&mut b).is_none());
}

#[test]
fn test_takes_hanging_queen() {
    let mut b = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let best = searcher(2).compute_best_move(&mut b).unwrap();
    assert_eq!(best.mv, Move::new(D2, D5, PieceKind::Rook));
    assert!(best.score > 0.0);
}

#[test]
fn test_quiescence_sees_recapture() {
    // Qxd5 loses the queen to cxd5
    let mut b = board("7k/6pp/2p5/3p4/8/8/8/3QK3 w - - 0 1");
    let best = searcher(1).compute_best_move(&mut b).unwrap();
    assert_ne!(best.mv, Move::new(D1, D5, PieceKind::Queen));

    let mut s = searcher(1);
    s.set_quiescence_depth(0);
    let greedy = s.compute_best_move(&mut b).unwrap();
    assert_eq!(greedy.mv, Move::new(D1, D5, PieceKind::Queen));
}

#[test]
fn test_search_is_deterministic() {
    let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut s = searcher(2);
    let first = s.compute_best_move(&mut b);
    let second = s.compute_best_move(&mut b);
    assert_eq!(first, second);
    assert_eq!(searcher(2).compute_best_move(&mut b), first);
}

#[test]
fn test_search_keeps_redo_branch() {
    let mut b = Board::startpos();
    assert!(b.move_piece(E2, E4));
    assert!(b.undo());
    assert!(b.history().can_redo());

    searcher(2).compute_best_move(&mut b);

    assert!(b.history().can_redo());
    assert!(b.redo());
    assert_eq!(b.find_piece_at(E4).map(|p| p.kind), Some(PieceKind::Pawn));
}

#[test]
fn test_mate_scores_are_stored_ply_relative() {
    let mate_in_three_plies = MATE - 3.0;
    let stored = score_to_tt(mate_in_three_plies, 2);
    assert_eq!(stored, MATE - 1.0);
    assert_eq!(score_from_tt(stored, 2), mate_in_three_plies);
    assert_eq!(score_from_tt(stored, 4), MATE - 5.0);

    assert_eq!(score_to_tt(-(MATE - 3.0), 2), -(MATE - 1.0));
    assert_eq!(score_to_tt(1.25, 7), 1.25);
}

#[test]
fn test_mating_move_against_king_on_e8() {
    let mut b = board("4k3/8/4K3/8/8/8/8/7Q w - - 0 1");
    let best = searcher(3).compute_best_move(&mut b).unwrap();
    assert_eq!(best.score, MATE - 1.0);

    assert!(b.make_move(best.mv));
    assert!(b.is_checkmate(Color::Black));
}

#[test]
fn test_pending_promotion_blocks_search() {
    let mut b = board("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert!(b.move_piece(A7, A8));
    assert_eq!(b.pending_promotion(), Some((A7, A8)));

    let mut s = searcher(2);
    assert!(s.compute_best_move(&mut b).is_none());
    assert_eq!(s.nodes(), 0);

    assert!(b.promote(A7, A8, PieceKind::Queen));
    assert!(s.compute_best_move(&mut b).is_some());
}
