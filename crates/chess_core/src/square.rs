//! Board coordinates.
//!
//! A [`Square`] is a file (`0..=7`, a..h) and a rank (`1..=8`) packed into a
//! board index: a1 = 0, b1 = 1, ..., h8 = 63.

use std::fmt;
use std::str::FromStr;

use crate::error::SquareParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Square from a board index (0..64).
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Square {
        assert!(idx < 64, "square index out of range");
        Square(idx)
    }

    /// Square from a file (0..=7) and a rank (1..=8), if on the board.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Option<Square> {
        if file >= 0 && file < 8 && rank >= 1 && rank <= 8 {
            Some(Square(((rank - 1) as u8) * 8 + file as u8))
        } else {
            None
        }
    }

    /// Square from a display row (0 = rank 8, top of the board) and column (file).
    pub const fn from_row_column(row: i8, column: i8) -> Option<Square> {
        Square::new(column, 8 - row)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn file(self) -> i8 {
        (self.0 % 8) as i8
    }

    #[inline(always)]
    pub const fn rank(self) -> i8 {
        (self.0 / 8) as i8 + 1
    }

    pub const fn row(self) -> i8 {
        8 - self.rank()
    }

    pub const fn column(self) -> i8 {
        self.file()
    }

    /// The square `df` files and `dr` ranks away, if still on the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::new(self.file() + df, self.rank() + dr)
    }

    /// All 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file() as u8) as char;
        let rank = (b'0' + self.rank() as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(SquareParseError::Length(s.to_string()));
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) {
            return Err(SquareParseError::File(b[0] as char));
        }
        if !(b'1'..=b'8').contains(&r) {
            return Err(SquareParseError::Rank(r as char));
        }
        Ok(Square((r - b'1') * 8 + (f - b'a')))
    }
}

// Rank 1
pub const A1: Square = Square(0);
pub const B1: Square = Square(1);
pub const C1: Square = Square(2);
pub const D1: Square = Square(3);
pub const E1: Square = Square(4);
pub const F1: Square = Square(5);
pub const G1: Square = Square(6);
pub const H1: Square = Square(7);
// Rank 2
pub const A2: Square = Square(8);
pub const B2: Square = Square(9);
pub const C2: Square = Square(10);
pub const D2: Square = Square(11);
pub const E2: Square = Square(12);
pub const F2: Square = Square(13);
pub const G2: Square = Square(14);
pub const H2: Square = Square(15);
// Rank 3
pub const A3: Square = Square(16);
pub const B3: Square = Square(17);
pub const C3: Square = Square(18);
pub const D3: Square = Square(19);
pub const E3: Square = Square(20);
pub const F3: Square = Square(21);
pub const G3: Square = Square(22);
pub const H3: Square = Square(23);
// Rank 4
pub const A4: Square = Square(24);
pub const B4: Square = Square(25);
pub const C4: Square = Square(26);
pub const D4: Square = Square(27);
pub const E4: Square = Square(28);
pub const F4: Square = Square(29);
pub const G4: Square = Square(30);
pub const H4: Square = Square(31);
// Rank 5
pub const A5: Square = Square(32);
pub const B5: Square = Square(33);
pub const C5: Square = Square(34);
pub const D5: Square = Square(35);
pub const E5: Square = Square(36);
pub const F5: Square = Square(37);
pub const G5: Square = Square(38);
pub const H5: Square = Square(39);
// Rank 6
pub const A6: Square = Square(40);
pub const B6: Square = Square(41);
pub const C6: Square = Square(42);
pub const D6: Square = Square(43);
pub const E6: Square = Square(44);
pub const F6: Square = Square(45);
pub const G6: Square = Square(46);
pub const H6: Square = Square(47);
// Rank 7
pub const A7: Square = Square(48);
pub const B7: Square = Square(49);
pub const C7: Square = Square(50);
pub const D7: Square = Square(51);
pub const E7: Square = Square(52);
pub const F7: Square = Square(53);
pub const G7: Square = Square(54);
pub const H7: Square = Square(55);
// Rank 8
pub const A8: Square = Square(56);
pub const B8: Square = Square(57);
pub const C8: Square = Square(58);
pub const D8: Square = Square(59);
pub const E8: Square = Square(60);
pub const F8: Square = Square(61);
pub const G8: Square = Square(62);
pub const H8: Square = Square(63);

#[cfg(test)]
#[path = "square_tests.rs"]
mod square_tests;
