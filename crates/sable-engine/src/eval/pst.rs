//! Piece-square tables.
//!
//! Tables are written from White's point of view in LERF order: index 0 is
//! A1, index 7 is H1, index 56 is A8. Black reads the vertically mirrored
//! square. Pawns and kings have separate opening and endgame tables that
//! [`crate::eval`] blends by the endgame factor.

use sable_core::{Color, Square};

#[rustfmt::skip]
pub const PAWNS: [i32; 64] = [
    // Rank 1
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4
      0,   0,   0,  20,  20,   0,   0,   0,
    // Rank 5
      5,   5,  10,  25,  25,  10,   5,   5,
    // Rank 6
     10,  10,  20,  30,  30,  20,  10,  10,
    // Rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
pub const PAWNS_END: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     20,  20,  20,  20,  20,  20,  20,  20,
     30,  30,  30,  30,  30,  30,  30,  30,
     50,  50,  50,  50,  50,  50,  50,  50,
     80,  80,  80,  80,  80,  80,  80,  80,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
pub const ROOKS: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
pub const KNIGHTS: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
pub const BISHOPS: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
pub const QUEENS: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
pub const KING_START: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,  -5,  -5,  -5,  -5,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -40, -50, -50, -60, -60, -50, -50, -40,
    -60, -60, -60, -60, -60, -60, -60, -60,
    -80, -70, -70, -70, -70, -70, -70, -80,
];

#[rustfmt::skip]
pub const KING_END: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -25,   0,   0,   0,   0, -25, -30,
    -25, -20,  20,  25,  25,  20, -20, -25,
    -20, -15,  30,  40,  40,  30, -15, -20,
    -15, -10,  35,  45,  45,  35, -10, -15,
    -10,  -5,  20,  30,  30,  20,  -5, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

/// Look up `table` for a piece of `color` on `sq`.
#[inline]
pub fn read(table: &[i32; 64], sq: Square, color: Color) -> i32 {
    match color {
        Color::White => table[sq.index()],
        Color::Black => table[sq.flip_rank().index()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_reads_mirrored_square() {
        assert_eq!(read(&PAWNS, Square::D2, Color::White), -20);
        assert_eq!(read(&PAWNS, Square::D7, Color::Black), -20);
        assert_eq!(read(&KING_START, Square::G1, Color::White), 30);
        assert_eq!(read(&KING_START, Square::G8, Color::Black), 30);
    }

    #[test]
    fn pawns_advance_towards_promotion() {
        assert_eq!(read(&PAWNS_END, Square::A7, Color::White), 80);
        assert_eq!(read(&PAWNS_END, Square::A2, Color::Black), 80);
    }

    #[test]
    fn symmetric_tables_are_file_symmetric() {
        for table in [&PAWNS_END, &ROOKS, &KNIGHTS, &KING_START, &KING_END] {
            for sq in Square::all() {
                let mirror = sq.index() ^ 7;
                assert_eq!(table[sq.index()], table[mirror], "{sq}");
            }
        }
    }
}
