//! Compile-time attack tables for leapers and sliding rays.

use crate::bitboard::Bitboard;

#[rustfmt::skip]
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

#[rustfmt::skip]
const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

/// Ray directions as (rank step, file step).
///
/// The first four increase the square index, the last four decrease it.
pub(super) const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // north
    (0, 1),   // east
    (1, 1),   // north-east
    (1, -1),  // north-west
    (-1, 0),  // south
    (0, -1),  // west
    (-1, 1),  // south-east
    (-1, -1), // south-west
];

/// Directions a rook slides along, as indices into [`DIRECTIONS`].
pub(super) const ROOK_DIRS: [usize; 4] = [0, 1, 4, 5];
/// Directions a bishop slides along, as indices into [`DIRECTIONS`].
pub(super) const BISHOP_DIRS: [usize; 4] = [2, 3, 6, 7];

const fn on_board(rank: i8, file: i8) -> bool {
    rank >= 0 && rank < 8 && file >= 0 && file < 8
}

const fn leaper_table(deltas: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let (rank, file) = ((sq / 8) as i8, (sq % 8) as i8);
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (r, f) = (rank + deltas[i].0, file + deltas[i].1);
            if on_board(r, f) {
                bits |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

const fn pawn_table() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        let (rank, file) = ((sq / 8) as i8, (sq % 8) as i8);
        let mut color = 0;
        while color < 2 {
            let forward = if color == 0 { 1 } else { -1 };
            let mut bits = 0u64;
            if on_board(rank + forward, file - 1) {
                bits |= 1u64 << ((rank + forward) * 8 + file - 1);
            }
            if on_board(rank + forward, file + 1) {
                bits |= 1u64 << ((rank + forward) * 8 + file + 1);
            }
            table[color][sq] = Bitboard::new(bits);
            color += 1;
        }
        sq += 1;
    }
    table
}

const fn ray_table() -> [[Bitboard; 64]; 8] {
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (dr, df) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let (mut r, mut f) = ((sq / 8) as i8 + dr, (sq % 8) as i8 + df);
            let mut bits = 0u64;
            while on_board(r, f) {
                bits |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            table[dir][sq] = Bitboard::new(bits);
            sq += 1;
        }
        dir += 1;
    }
    table
}

pub(super) static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
pub(super) static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);
pub(super) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = pawn_table();
pub(super) static RAYS: [[Bitboard; 64]; 8] = ray_table();
