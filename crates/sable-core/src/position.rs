//! A board plus the history needed for in-place make/unmake and draw detection.

use std::ops::{Deref, DerefMut};

use crate::board::Board;
use crate::chess_move::Move;
use crate::error::FenError;

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u16 = 100;

/// The current board, an undo stack, and the hashes of every earlier position.
///
/// [`Position::make_move`] and [`Position::unmake_move`] must be paired in
/// strict stack order. [`Position::play`] returns a guard that enforces this
/// by unmaking on drop.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    undo: Vec<Board>,
    history: Vec<u64>,
}

impl Position {
    pub fn new(board: Board) -> Position {
        Position {
            board,
            undo: Vec::with_capacity(256),
            history: Vec::with_capacity(256),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        Ok(Position::new(fen.parse()?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    /// Hashes of the positions before the current one, oldest first.
    pub fn repetition_history(&self) -> &[u64] {
        &self.history
    }

    /// Play `mv`, remembering the current state for [`Position::unmake_move`].
    pub fn make_move(&mut self, mv: Move) {
        self.history.push(self.board.hash());
        self.undo.push(self.board);
        self.board = self.board.make_move(mv);
    }

    /// Restore the state before the most recent [`Position::make_move`].
    /// Does nothing if no move has been made.
    pub fn unmake_move(&mut self) {
        if let Some(previous) = self.undo.pop() {
            self.board = previous;
            self.history.pop();
        }
    }

    /// Play `mv` for the lifetime of the returned guard.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        self.make_move(mv);
        MoveGuard { position: self }
    }

    /// Return `true` if the current position occurred before since the last
    /// irreversible move.
    pub fn is_repetition(&self) -> bool {
        let hash = self.board.hash();
        self.history
            .iter()
            .rev()
            .take(self.board.halfmove_clock() as usize)
            .any(|&h| h == hash)
    }

    /// Return `true` once the fifty-move counter has run out.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= FIFTY_MOVE_PLIES
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(Board::starting_position())
    }
}

/// Keeps a move applied to a [`Position`] until dropped.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;
    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.position.unmake_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn knight_shuffle() -> [Move; 4] {
        [
            Move::new(Square::G1, Square::F3),
            Move::new(Square::G8, Square::F6),
            Move::new(Square::F3, Square::G1),
            Move::new(Square::F6, Square::G8),
        ]
    }

    #[test]
    fn guard_restores_board_on_drop() {
        let mut pos = Position::default();
        let before = *pos.board();
        {
            let mut guard = pos.play(Move::new(Square::E2, Square::E4));
            assert_ne!(guard.board(), &before);
            let inner = guard.play(Move::new(Square::E7, Square::E5));
            assert_eq!(inner.repetition_history().len(), 2);
        }
        assert_eq!(pos.board(), &before);
        assert!(pos.repetition_history().is_empty());
    }

    #[test]
    fn knight_shuffle_repeats_start() {
        let mut pos = Position::default();
        for mv in knight_shuffle() {
            assert!(!pos.is_repetition());
            pos.make_move(mv);
        }
        assert!(pos.is_repetition());
        pos.unmake_move();
        assert!(!pos.is_repetition());
    }

    #[test]
    fn pawn_move_breaks_repetition_window() {
        let mut pos = Position::default();
        for mv in knight_shuffle() {
            pos.make_move(mv);
        }
        pos.make_move(Move::new(Square::E2, Square::E4));
        pos.make_move(Move::new(Square::E7, Square::E5));
        for mv in knight_shuffle() {
            pos.make_move(mv);
        }
        assert!(pos.is_repetition());
        assert_eq!(pos.board().halfmove_clock(), 4);
    }

    #[test]
    fn fifty_move_counter() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 100 80").unwrap();
        assert!(pos.is_fifty_move_draw());
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 80").unwrap();
        assert!(!pos.is_fifty_move_draw());
    }

    #[test]
    fn unmake_without_history_is_a_no_op() {
        let mut pos = Position::default();
        pos.unmake_move();
        assert_eq!(pos.board(), &Board::starting_position());
    }
}
