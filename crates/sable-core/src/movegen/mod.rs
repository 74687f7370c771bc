//! Legal move generation.
//!
//! Moves are generated pseudo-legally and then filtered by playing each one
//! on a copy of the board and rejecting those that leave the mover's king
//! attacked. The noisy variant restricts generation to captures (en passant
//! included) and promotions, for quiescence search.

mod pawns;
mod pieces;

use crate::board::Board;
use crate::chess_move::Move;

use self::pawns::gen_pawns;
use self::pieces::{gen_castling, gen_pieces};

/// Selects which moves a generator emits.
pub(crate) trait GenKind {
    const NOISY_ONLY: bool;
}

/// Every pseudo-legal move.
pub(crate) struct AllMoves;
impl GenKind for AllMoves {
    const NOISY_ONLY: bool = false;
}

/// Captures and promotions only.
pub(crate) struct NoisyMoves;
impl GenKind for NoisyMoves {
    const NOISY_ONLY: bool = true;
}

/// Stack-allocated move buffer. 256 slots cover the known maximum of 218 legal moves.
pub struct MoveList {
    moves: [Move; 256],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; 256],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < self.moves.len());
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Keep only the moves for which `keep` returns `true`, preserving order.
    fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            let mv = self.moves[i];
            if keep(mv) {
                self.moves[kept] = mv;
                kept += 1;
            }
        }
        self.len = kept;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn generate<K: GenKind>(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    gen_pawns::<K>(board, &mut list);
    gen_pieces::<K>(board, &mut list);
    if !K::NOISY_ONLY {
        gen_castling(board, &mut list);
    }

    let us = board.side_to_move();
    list.retain(|mv| {
        let next = board.make_move(mv);
        !next.is_square_attacked(next.king_square(us), us.flip())
    });
    list
}

/// Generate all legal moves for the side to move.
pub fn generate_legal_moves(board: &Board) -> MoveList {
    generate::<AllMoves>(board)
}

/// Generate the legal captures, en passant captures and promotions.
pub fn generate_noisy_moves(board: &Board) -> MoveList {
    generate::<NoisyMoves>(board)
}
