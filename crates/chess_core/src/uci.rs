use crate::{board::Board, error::UciError, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Matches `txt` ("e2e4", "e7e8q") against the legal moves of `board`.
/// A promotion without a piece letter becomes a queen.
pub fn parse_uci_move(board: &mut Board, txt: &str) -> Option<Move> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = txt[0..2].parse().ok()?;
    let to = txt[2..4].parse().ok()?;
    let promo = match txt[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c).filter(|k| k.is_promotion_target())?),
        None => None,
    };

    legal_moves(board).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && match m.promotion {
                None => promo.is_none(),
                Some(kind) => kind == promo.unwrap_or(PieceKind::Queen),
            }
    })
}

/// Applies the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn set_position_from_uci(board: &mut Board, args: &[&str]) -> Result<(), UciError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let setup = &args[..moves_at];

    *board = match setup.first() {
        None | Some(&"startpos") => Board::startpos(),
        Some(&"fen") => Board::from_fen(&setup[1..].join(" "))?,
        Some(other) => return Err(UciError::Position(other.to_string())),
    };

    for &txt in args.iter().skip(moves_at + 1) {
        let mv = parse_uci_move(board, txt).ok_or_else(|| UciError::IllegalMove(txt.to_string()))?;
        if !board.make_move(mv) {
            return Err(UciError::IllegalMove(txt.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::*;

    #[test]
    fn test_parse_uci_move() {
        let mut board = Board::startpos();
        let mv = parse_uci_move(&mut board, "e2e4").unwrap();
        assert_eq!(mv, Move::new(E2, E4, PieceKind::Pawn));
        assert_eq!(move_to_uci(mv), "e2e4");
        assert!(parse_uci_move(&mut board, "e2e5").is_none());
        assert!(parse_uci_move(&mut board, "zz").is_none());
        // A piece letter only belongs on a promotion
        assert!(parse_uci_move(&mut board, "e2e4q").is_none());
    }

    #[test]
    fn test_parse_promotion() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mv = parse_uci_move(&mut board, "a7a8n").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(move_to_uci(mv), "a7a8n");
        let mv = parse_uci_move(&mut board, "a7a8").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert!(parse_uci_move(&mut board, "a7a8k").is_none());
    }

    #[test]
    fn test_set_position() {
        let mut board = Board::default();
        set_position_from_uci(&mut board, &["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );

        set_position_from_uci(
            &mut board,
            &["fen", "4k3/8/8/8/8/8/4P3/4K3", "w", "-", "-", "0", "1", "moves", "e2e4"],
        )
        .unwrap();
        assert_eq!(board.to_fen(), "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");

        assert_eq!(
            set_position_from_uci(&mut board, &["startpos", "moves", "e2e5"]),
            Err(UciError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(
            set_position_from_uci(&mut board, &["startpos", "moves", "e2e4q"]),
            Err(UciError::IllegalMove("e2e4q".to_string()))
        );
    }
}
