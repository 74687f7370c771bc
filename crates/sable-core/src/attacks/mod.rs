//! Attack generation for every piece type.
//!
//! Leaper attacks are plain table lookups. Sliding attacks walk precomputed
//! rays and cut each ray at its first blocker.

mod tables;

use crate::bitboard::Bitboard;
use crate::piece::Color;
use crate::square::Square;

use self::tables::{BISHOP_DIRS, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, RAYS, ROOK_DIRS};

/// Return the squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Return the squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Return the squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Ray from `sq` in direction `dir`, stopping at (and including) the first occupied square.
#[inline]
fn ray_attacks(dir: usize, sq: Square, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq.index()];
    let blockers = ray & occupied;
    // Directions 0..4 run towards higher indices, so the nearest blocker is the lowest bit.
    let nearest = if dir < 4 { blockers.lsb() } else { blockers.msb() };
    match nearest {
        Some(blocker) => ray ^ RAYS[dir][blocker.index()],
        None => ray,
    }
}

/// Return rook attacks from `sq` given `occupied` squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ROOK_DIRS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(dir, sq, occupied))
}

/// Return bishop attacks from `sq` given `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    BISHOP_DIRS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(dir, sq, occupied))
}

/// Return queen attacks from `sq` given `occupied` squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_centre_and_corner() {
        assert_eq!(knight_attacks(Square::E4).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
    }

    #[test]
    fn king_edge_and_centre() {
        assert_eq!(king_attacks(Square::E1).count(), 5);
        assert_eq!(king_attacks(Square::E4).count(), 8);
    }

    #[test]
    fn pawns_do_not_wrap_files() {
        let a4 = pawn_attacks(Color::White, Square::A4);
        assert_eq!(a4.count(), 1);
        assert!(a4.contains(Square::B5));

        let h5 = pawn_attacks(Color::Black, Square::H5);
        assert_eq!(h5.count(), 1);
        assert!(h5.contains(Square::G4));
    }

    #[test]
    fn rook_sees_fourteen_squares_on_empty_board() {
        for sq in Square::all() {
            assert_eq!(rook_attacks(sq, Bitboard::EMPTY).count(), 14, "rook on {sq}");
        }
    }

    #[test]
    fn bishop_d4_empty_board() {
        assert_eq!(bishop_attacks(Square::D4, Bitboard::EMPTY).count(), 13);
    }

    #[test]
    fn blockers_cut_rays_in_both_directions() {
        let occupied = Square::E6.bitboard() | Square::E2.bitboard() | Square::B4.bitboard();
        let attacks = rook_attacks(Square::E4, occupied);
        assert!(attacks.contains(Square::E6));
        assert!(!attacks.contains(Square::E7));
        assert!(attacks.contains(Square::E2));
        assert!(!attacks.contains(Square::E1));
        assert!(attacks.contains(Square::B4));
        assert!(!attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
    }

    #[test]
    fn bishop_blocked_on_diagonal() {
        let occupied = Square::C2.bitboard() | Square::G6.bitboard();
        let attacks = bishop_attacks(Square::E4, occupied);
        assert!(attacks.contains(Square::C2));
        assert!(!attacks.contains(Square::B1));
        assert!(attacks.contains(Square::G6));
        assert!(!attacks.contains(Square::H7));
        assert!(attacks.contains(Square::A8));
    }
}
