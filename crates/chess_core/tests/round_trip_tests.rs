//! Random playouts: every applied move must be undoable back to the start.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_core::{compute_hash, Board, Color, Piece, Square};

const PLAYOUTS: u64 = 24;
const MAX_PLIES: usize = 120;

#[derive(Debug, PartialEq)]
struct Snapshot {
    pieces: Vec<(Square, Piece)>,
    turn: Color,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
    repetitions: u32,
}

fn snapshot(board: &Board) -> Snapshot {
    Snapshot {
        pieces: board.pieces().collect(),
        turn: board.turn(),
        en_passant: board.en_passant(),
        halfmove_clock: board.halfmove_clock(),
        fullmove_number: board.fullmove_number(),
        hash: board.hash(),
        repetitions: board.repetition_count(),
    }
}

fn play_random(board: &mut Board, rng: &mut StdRng) -> Vec<Snapshot> {
    let mut trail = vec![snapshot(board)];
    for _ in 0..MAX_PLIES {
        let moves = board.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        assert!(board.make_move(mv), "generated move {mv} rejected");
        assert_eq!(board.hash(), compute_hash(board), "hash drifted after {mv}");
        let mover = board.turn().other();
        assert!(!board.is_check(mover), "{mv} left the mover in check");
        trail.push(snapshot(board));
    }
    trail
}

#[test]
fn make_unmake_round_trip() {
    for seed in 0..PLAYOUTS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::startpos();
        let mut trail = play_random(&mut board, &mut rng);

        trail.pop();
        while let Some(expected) = trail.pop() {
            assert!(board.unmake_move());
            assert_eq!(snapshot(&board), expected, "seed {seed}");
        }
        assert!(!board.unmake_move());
    }
}

#[test]
fn undo_redo_round_trip() {
    for seed in 0..PLAYOUTS / 4 {
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let mut board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let start = snapshot(&board);

        let trail = play_random(&mut board, &mut rng);
        let end = trail.last().map(|s| s.hash);

        let mut undone = 0;
        while board.undo() {
            undone += 1;
        }
        assert_eq!(undone, trail.len() - 1);
        assert_eq!(snapshot(&board), start);

        while board.redo() {}
        assert_eq!(Some(board.hash()), end);
        assert_eq!(snapshot(&board), trail[trail.len() - 1]);
    }
}
