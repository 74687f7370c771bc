//! Zobrist keys and from-scratch hashing.
//!
//! All keys come from one xorshift64 stream laid out as
//! `[piece-square (12 * 64) | side to move | castling (16) | en passant file (8)]`.

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

const PIECE_SQUARE_KEYS: usize = Piece::COUNT * Square::COUNT;
const SIDE_KEY: usize = PIECE_SQUARE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EN_PASSANT_KEYS: usize = CASTLING_KEYS + 16;
const KEY_COUNT: usize = EN_PASSANT_KEYS + 8;

const SEED: u64 = 0x736f_6e61_7461_2131;

static KEYS: [u64; KEY_COUNT] = {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        keys[i] = state;
        i += 1;
    }
    keys
};

/// Key for `piece` standing on `sq`.
#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS[piece.index() * Square::COUNT + sq.index()]
}

/// Key toggled whenever the side to move changes.
#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[SIDE_KEY]
}

/// Key for a full castling-rights configuration.
#[inline]
pub(crate) fn castling(bits: u8) -> u64 {
    KEYS[CASTLING_KEYS + (bits & 0b1111) as usize]
}

/// Key for an en passant target on the given file index.
#[inline]
pub(crate) fn en_passant(file: usize) -> u64 {
    KEYS[EN_PASSANT_KEYS + file]
}

/// Compute the hash of `board` without using its incremental value.
pub fn hash_from_scratch(board: &Board) -> u64 {
    let mut hash = 0u64;
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for sq in board.pieces(kind) & board.side(color) {
                hash ^= piece_square(Piece::new(kind, color), sq);
            }
        }
    }
    if board.side_to_move() == Color::Black {
        hash ^= side_to_move();
    }
    hash ^= castling(board.castling().bits());
    if let Some(ep) = board.en_passant() {
        hash ^= en_passant(ep.file().index());
    }
    hash
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{KEYS, hash_from_scratch};
    use crate::board::Board;

    #[test]
    fn keys_are_distinct_and_nonzero() {
        let unique: HashSet<u64> = KEYS.iter().copied().collect();
        assert_eq!(unique.len(), KEYS.len());
        assert!(!unique.contains(&0));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let white: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let black: Board = "4k3/8/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_ne!(hash_from_scratch(&white), hash_from_scratch(&black));
    }
}
